/// Caret context resolution.
///
/// Classifies the token left of the caret into one of the completion
/// contexts.  The checks run in a fixed priority order:
///
/// 1. **Attribute name**: right after an element name or after a closing
///    attribute quote.  Wins over everything else.
/// 2. **Attribute value**: inside a quoted value.  Skipped when the request
///    was triggered by typing a space.
/// 3. **Element name**: only for explicit invocation or a typed `<`.
///
/// Anything the walk does not recognise resolves to an element-name context
/// with no structural facts, which still admits the elements usable
/// anywhere.
use std::collections::BTreeSet;

use rowan::TextSize;

use crate::syntax::SyntaxKind::*;
use crate::syntax::{
    ElementShape, SyntaxNode, SyntaxToken, end_quote, name_of, previous_significant_token,
    start_quote, start_tag_of,
};
use crate::types::{CompletionTrigger, ElementNameContext, ResolvedContext};

/// Resolve the completion context for the token left of `caret`.
pub fn resolve(token: &SyntaxToken, caret: TextSize, trigger: CompletionTrigger) -> ResolvedContext {
    if let Some((element_name, attributes)) = attribute_name_context(token, caret) {
        return ResolvedContext::AttributeName {
            element_name,
            existing_attribute_names: attributes.into_iter().collect(),
        };
    }

    // A typed space only ever opens attribute-name completion.
    if trigger == CompletionTrigger::Insertion(' ') {
        return ResolvedContext::None;
    }

    if let Some((element_name, attribute_name)) = attribute_value_context(token) {
        return ResolvedContext::AttributeValue {
            element_name,
            attribute_name,
        };
    }

    if let CompletionTrigger::Insertion(ch) = trigger
        && ch != '<'
    {
        return ResolvedContext::None;
    }

    ResolvedContext::ElementName(element_name_context(token))
}

// ─── Attribute names ────────────────────────────────────────────────────────

/// The element owning an attribute-name position, with the names of the
/// attributes already on its tag.
fn attribute_name_context(token: &SyntaxToken, caret: TextSize) -> Option<(String, Vec<String>)> {
    let mut token = token.clone();

    if token.kind() == TEXT_LITERAL && token.text().trim().is_empty() {
        token = previous_significant_token(&token)?;
    }

    // A partially typed attribute name: look at what precedes it.
    if token.kind() == IDENT && token.text_range().contains_inclusive(caret) {
        token = previous_significant_token(&token)?;
    }

    let parent = token.parent()?;
    let owner = if token.kind() == IDENT && parent.kind() == XML_NAME {
        parent.parent()?
    } else if parent.kind() == XML_ATTRIBUTE && end_quote(&parent).as_ref() == Some(&token) {
        parent.parent()?
    } else {
        return None;
    };

    ElementShape::of(&owner).name_and_attributes()
}

// ─── Attribute values ───────────────────────────────────────────────────────

/// The `(element, attribute)` pair for a caret inside an attribute value.
fn attribute_value_context(token: &SyntaxToken) -> Option<(String, String)> {
    let attribute = token.parent()?;
    if attribute.kind() != XML_ATTRIBUTE {
        return None;
    }

    let in_value =
        token.kind() == TEXT_LITERAL || start_quote(&attribute).as_ref() == Some(token);
    if !in_value {
        return None;
    }

    let attribute_name = name_of(&attribute)?;
    let element_name = attribute
        .ancestors()
        .find(|node| node.kind() == XML_EMPTY_ELEMENT)
        .or_else(|| {
            attribute
                .ancestors()
                .find(|node| node.kind() == XML_START_TAG)
        })
        .and_then(|tag| name_of(&tag))?;

    Some((element_name, attribute_name))
}

// ─── Element names ──────────────────────────────────────────────────────────

/// Structural facts about an element-name position.
fn element_name_context(token: &SyntaxToken) -> ElementNameContext {
    let mut context = ElementNameContext::default();

    let Some(parent) = token.parent() else {
        return context;
    };
    let grandparent = parent.parent();
    let great_grandparent = grandparent.as_ref().and_then(SyntaxNode::parent);

    let kind_of = |node: &Option<SyntaxNode>| node.as_ref().map(SyntaxNode::kind);
    let grandparent_kind = kind_of(&grandparent);
    let great_grandparent_kind = kind_of(&great_grandparent);

    let in_content = match parent.kind() {
        XML_EMPTY_ELEMENT | XML_TEXT => true,
        XML_END_TAG => token.kind() == GREATER_THAN,
        XML_NAME => grandparent_kind == Some(XML_EMPTY_ELEMENT),
        _ => false,
    };

    if in_content {
        if grandparent_kind == Some(XML_ELEMENT) || great_grandparent_kind == Some(XML_ELEMENT) {
            context.allows_unrestricted_nested = true;
        }

        if grandparent_kind == Some(XML_ELEMENT)
            && let Some(name) = grandparent.as_ref().and_then(element_tag_name)
        {
            context.parent_names.insert(name);
        }

        if grandparent_kind == Some(XML_EMPTY_ELEMENT)
            && great_grandparent_kind == Some(XML_ELEMENT)
            && let Some(name) = great_grandparent.as_ref().and_then(element_tag_name)
        {
            context.parent_names.insert(name);
        }

        let at_root = grandparent_kind == Some(DOC_COMMENT)
            || (grandparent_kind == Some(XML_EMPTY_ELEMENT)
                && great_grandparent_kind == Some(DOC_COMMENT));
        if at_root {
            context.at_root = true;
            context.existing_top_level_names = parent
                .ancestors()
                .find(|node| node.kind() == DOC_COMMENT)
                .map(|root| top_level_names(&root))
                .unwrap_or_default();
        }
    }

    // Invoked right after the `>` of a start tag.
    if parent.kind() == XML_START_TAG && token.kind() == GREATER_THAN {
        context.allows_unrestricted_nested = true;
        if let Some(name) = name_of(&parent) {
            context.parent_names.insert(name);
        }
    }

    context
}

fn element_tag_name(element: &SyntaxNode) -> Option<String> {
    start_tag_of(element).and_then(|tag| name_of(&tag))
}

/// Names of the elements that are direct children of the comment root.
fn top_level_names(root: &SyntaxNode) -> BTreeSet<String> {
    root.children()
        .filter_map(|child| ElementShape::of(&child).name_and_attributes())
        .map(|(name, _)| name)
        .collect()
}
