/// Completion candidate building.
///
/// This module turns registry entries into [`Candidate`]s with their
/// insertion templates, computes the text change performed when a candidate
/// is committed, and maps candidates to LSP `CompletionItem`s.
use std::ops::Range;

use tower_lsp::lsp_types::*;

use crate::completion::trigger::is_identifier_part;
use crate::registry::Registry;
use crate::types::*;
use crate::util::offset_to_position;

// ─── Candidates ─────────────────────────────────────────────────────────────

/// An element candidate.
///
/// Inserts `<name`, the element's default attribute skeleton, and `/>` for
/// self-closing elements, leaving the caret inside the skeleton.
pub fn element_candidate(element: &ElementDefinition) -> Candidate {
    let mut before_caret = format!("<{}", element.name);
    if let Some(text) = element
        .text_before_caret
        .as_deref()
        .filter(|text| !text.trim().is_empty())
    {
        before_caret.push(' ');
        before_caret.push_str(text);
    }

    let mut after_caret = element.text_after_caret.clone().unwrap_or_default();
    if element.is_self_closing {
        after_caret.push_str("/>");
    }

    Candidate {
        kind: CandidateKind::Element,
        display_text: element.display_text().to_string(),
        description: element.description.clone(),
        template: InsertionTemplate {
            before_caret,
            after_caret,
        },
    }
}

/// An attribute candidate: `name="` with the closing quote after the caret.
pub fn attribute_candidate(attribute: &AttributeDefinition) -> Candidate {
    Candidate {
        kind: CandidateKind::Attribute,
        display_text: attribute.name.clone(),
        description: attribute.description.clone(),
        template: InsertionTemplate {
            before_caret: format!("{}=\"", attribute.name),
            after_caret: "\"".to_string(),
        },
    }
}

pub fn attribute_value_candidate(value: &str) -> Candidate {
    Candidate {
        kind: CandidateKind::AttributeValue,
        display_text: value.to_string(),
        description: None,
        template: InsertionTemplate {
            before_caret: value.to_string(),
            after_caret: String::new(),
        },
    }
}

/// Query the registry for the candidates of a resolved context.
pub fn candidates_for(context: &ResolvedContext, registry: &Registry) -> Vec<Candidate> {
    match context {
        ResolvedContext::ElementName(context) => registry
            .element_candidates(context)
            .into_iter()
            .map(element_candidate)
            .collect(),
        ResolvedContext::AttributeName {
            element_name,
            existing_attribute_names,
        } => registry
            .attribute_candidates(element_name, existing_attribute_names)
            .into_iter()
            .map(attribute_candidate)
            .collect(),
        ResolvedContext::AttributeValue {
            element_name,
            attribute_name,
        } => registry
            .attribute_value_candidates(element_name, attribute_name)
            .iter()
            .map(|value| attribute_value_candidate(value))
            .collect(),
        ResolvedContext::None => Vec::new(),
    }
}

// ─── Committing ─────────────────────────────────────────────────────────────

/// A replacement in the document plus the resulting caret offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Byte range of the source text that is replaced.
    pub range: Range<usize>,
    pub new_text: String,
    /// Byte offset of the caret after the change is applied.
    pub caret: usize,
}

/// The span a completion item replaces: the identifier characters around
/// `offset`.  Empty when the caret is not touching a word.
pub fn completion_span(text: &str, offset: usize) -> Range<usize> {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|&(_, ch)| is_identifier_part(ch))
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(offset);

    let end = text[offset..]
        .char_indices()
        .find(|&(_, ch)| !is_identifier_part(ch))
        .map(|(idx, _)| offset + idx)
        .unwrap_or(text.len());

    start..end
}

/// The text change performed when a candidate is committed over `span`.
///
/// When the text before the span is `<` and the template also starts with
/// `<`, the replacement swallows the typed bracket.  A commit character is
/// kept unless it is whitespace or repeats the template's last character;
/// the caret lands after the before-caret text and any kept commit
/// character.
pub fn commit_change(
    text: &str,
    span: Range<usize>,
    template: &InsertionTemplate,
    commit_char: Option<char>,
) -> TextChange {
    let mut start = span.start;
    if template.before_caret.starts_with('<')
        && text.get(..start).is_some_and(|prefix| prefix.ends_with('<'))
    {
        start -= 1;
    }

    let mut new_text = template.before_caret.clone();
    if let Some(ch) = commit_char
        && !ch.is_whitespace()
        && !template.before_caret.ends_with(ch)
    {
        new_text.push(ch);
    }

    let caret = start + new_text.len();
    new_text.push_str(&template.after_caret);

    TextChange {
        range: start..span.end,
        new_text,
        caret,
    }
}

// ─── LSP items ──────────────────────────────────────────────────────────────

/// Escape text for use inside an LSP snippet.
fn escape_snippet(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '$' | '}' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn item_kind(kind: CandidateKind) -> CompletionItemKind {
    match kind {
        CandidateKind::Element => CompletionItemKind::KEYWORD,
        CandidateKind::Attribute => CompletionItemKind::PROPERTY,
        CandidateKind::AttributeValue => CompletionItemKind::VALUE,
    }
}

/// Build the LSP item for `candidate` when completing at byte `offset` of
/// `content`.
///
/// The item carries a snippet text edit covering the commit replacement
/// range, with `$0` placed where the caret should land.
pub fn to_completion_item(candidate: &Candidate, content: &str, offset: usize) -> CompletionItem {
    let span = completion_span(content, offset);
    let change = commit_change(content, span.clone(), &candidate.template, None);

    let caret_in_text = change.caret - change.range.start;
    let (before, after) = change.new_text.split_at(caret_in_text);
    let snippet = format!("{}$0{}", escape_snippet(before), escape_snippet(after));

    // Clients filter on the replaced text, which includes a swallowed `<`.
    let filter_text = format!(
        "{}{}",
        &content[change.range.start..span.start],
        candidate.display_text
    );

    let range = tower_lsp::lsp_types::Range::new(
        offset_to_position(content, change.range.start),
        offset_to_position(content, change.range.end),
    );

    CompletionItem {
        label: candidate.display_text.clone(),
        kind: Some(item_kind(candidate.kind)),
        detail: candidate.description.clone(),
        filter_text: Some(filter_text),
        sort_text: Some(candidate.display_text.clone()),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range,
            new_text: snippet,
        })),
        ..CompletionItem::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(before: &str, after: &str) -> InsertionTemplate {
        InsertionTemplate {
            before_caret: before.to_string(),
            after_caret: after.to_string(),
        }
    }

    #[test]
    fn span_covers_word_around_offset() {
        let text = "/// <cod e";
        assert_eq!(completion_span(text, 7), 5..8);
        assert_eq!(completion_span(text, 5), 5..8);
        assert_eq!(completion_span(text, 4), 4..4);
    }

    #[test]
    fn swallows_typed_angle_bracket() {
        let text = "/// <co";
        let change = commit_change(text, 5..7, &template("<code language=\"", "\""), None);
        assert_eq!(change.range, 4..7);
        assert_eq!(change.new_text, "<code language=\"\"");
        assert_eq!(change.caret, 4 + "<code language=\"".len());
    }

    #[test]
    fn commit_character_rules() {
        let text = "/// <note ty";
        let attr = template("type=\"", "\"");

        let change = commit_change(text, 10..12, &attr, Some('>'));
        assert_eq!(change.new_text, "type=\">\"");
        assert_eq!(change.caret, 10 + "type=\">".len());

        let change = commit_change(text, 10..12, &attr, Some('"'));
        assert_eq!(change.new_text, "type=\"\"");

        let change = commit_change(text, 10..12, &attr, Some(' '));
        assert_eq!(change.caret, 10 + "type=\"".len());

        let change = commit_change(text, 10..12, &template("", ""), Some('x'));
        assert_eq!(change.new_text, "x");
    }

    #[test]
    fn snippet_marks_caret_and_escapes() {
        let candidate = Candidate {
            kind: CandidateKind::AttributeValue,
            display_text: "$x".to_string(),
            description: None,
            template: template("$x", ""),
        };
        let item = to_completion_item(&candidate, "/// <a b=\"\"", 10);
        let Some(CompletionTextEdit::Edit(edit)) = item.text_edit else {
            panic!("expected a text edit");
        };
        assert_eq!(edit.new_text, "\\$x$0");
        assert_eq!(edit.range.start, Position::new(0, 10));
    }
}
