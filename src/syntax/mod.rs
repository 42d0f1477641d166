//! Syntax trees for the XML inside `///` documentation comments.
//!
//! The completion resolver reasons about the caret purely in terms of
//! tokens and their parent nodes, so the tree keeps every character of the
//! comment (including the `///` line prefixes) in a lossless `rowan` tree:
//!
//! - [`parser`]: tolerant XML parser producing a `DOC_COMMENT` root
//! - [`doc_comment`]: locating the comment around a source offset
//!
//! The helpers in this module answer the structural questions the resolver
//! asks: which token is left of the caret, what element a node describes,
//! and which quote of an attribute a token is.

pub mod doc_comment;
pub mod parser;

pub use doc_comment::DocComment;
pub use parser::parse;

use rowan::{TextSize, TokenAtOffset};

/// Node and token kinds of the documentation comment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // Tokens
    LESS_THAN = 0,
    LESS_THAN_SLASH,
    GREATER_THAN,
    SLASH_GREATER_THAN,
    EQUALS,
    QUOTE,
    IDENT,
    TEXT_LITERAL,
    NEWLINE,
    WHITESPACE,
    DOC_EXTERIOR,
    ERROR,

    // Nodes
    XML_NAME,
    XML_ATTRIBUTE,
    XML_START_TAG,
    XML_END_TAG,
    XML_EMPTY_ELEMENT,
    XML_ELEMENT,
    XML_TEXT,
    DOC_COMMENT,
}

use SyntaxKind::*;

/// Every kind, indexed by discriminant.
const ALL_KINDS: &[SyntaxKind] = &[
    LESS_THAN,
    LESS_THAN_SLASH,
    GREATER_THAN,
    SLASH_GREATER_THAN,
    EQUALS,
    QUOTE,
    IDENT,
    TEXT_LITERAL,
    NEWLINE,
    WHITESPACE,
    DOC_EXTERIOR,
    ERROR,
    XML_NAME,
    XML_ATTRIBUTE,
    XML_START_TAG,
    XML_END_TAG,
    XML_EMPTY_ELEMENT,
    XML_ELEMENT,
    XML_TEXT,
    DOC_COMMENT,
];

impl SyntaxKind {
    /// Tokens the lookup skips, as the host lexer folds them into the
    /// neighbouring tokens.
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | DOC_EXTERIOR)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocXmlLanguage {}

impl rowan::Language for DocXmlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        ALL_KINDS.get(usize::from(raw.0)).copied().unwrap_or(ERROR)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<DocXmlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<DocXmlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<DocXmlLanguage>;

/// Find the token the caret is in or directly after.
///
/// A caret at the start of a token belongs to the previous token.  Trivia
/// (tag whitespace and `///` prefixes) are skipped backwards; when nothing
/// but trivia precedes the caret, the trivia token itself is returned so
/// the caller still has a position in the tree.
pub fn token_on_left_of_position(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    let range = root.text_range();
    if offset <= range.start() || offset > range.end() {
        return None;
    }

    let token = match root.token_at_offset(offset) {
        TokenAtOffset::None => return None,
        TokenAtOffset::Single(token) => token,
        TokenAtOffset::Between(left, _) => left,
    };

    if !token.kind().is_trivia() {
        return Some(token);
    }

    previous_significant_token(&token).or(Some(token))
}

/// The previous token, ignoring trivia.
pub fn previous_significant_token(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut current = token.prev_token();
    while let Some(candidate) = current {
        if !candidate.kind().is_trivia() {
            return Some(candidate);
        }
        current = candidate.prev_token();
    }
    None
}

/// The text of the `XML_NAME` child of `node`, empty when the name is
/// missing (as in a bare `<`).
pub fn name_of(node: &SyntaxNode) -> Option<String> {
    node.children()
        .find(|child| child.kind() == XML_NAME)
        .map(|name| name.text().to_string())
}

/// The start tag of an `XML_ELEMENT`.
pub fn start_tag_of(element: &SyntaxNode) -> Option<SyntaxNode> {
    element.children().find(|child| child.kind() == XML_START_TAG)
}

/// Attribute names written on a tag node, in document order.
pub fn attribute_names(tag: &SyntaxNode) -> Vec<String> {
    tag.children()
        .filter(|child| child.kind() == XML_ATTRIBUTE)
        .filter_map(|attr| name_of(&attr))
        .collect()
}

fn quotes_of(attribute: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    attribute
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|token| token.kind() == QUOTE)
}

/// The opening quote of an `XML_ATTRIBUTE`, if the value has started.
pub fn start_quote(attribute: &SyntaxNode) -> Option<SyntaxToken> {
    quotes_of(attribute).next()
}

/// The closing quote of an `XML_ATTRIBUTE`, if the value is terminated.
pub fn end_quote(attribute: &SyntaxNode) -> Option<SyntaxToken> {
    quotes_of(attribute).nth(1)
}

/// The element-like shapes a node can take.
#[derive(Debug, Clone)]
pub enum ElementShape {
    /// `<elem attr="" />`, or an incomplete `<elem attr=""`.
    SelfClosing(SyntaxNode),
    /// `<elem></elem>`: described by its start tag.
    WithStartTag(SyntaxNode),
    /// `<elem attr="">`
    StartTag(SyntaxNode),
    Other,
}

impl ElementShape {
    pub fn of(node: &SyntaxNode) -> Self {
        match node.kind() {
            XML_EMPTY_ELEMENT => ElementShape::SelfClosing(node.clone()),
            XML_ELEMENT => ElementShape::WithStartTag(node.clone()),
            XML_START_TAG => ElementShape::StartTag(node.clone()),
            _ => ElementShape::Other,
        }
    }

    /// The element name and the names of the attributes on its tag.
    pub fn name_and_attributes(&self) -> Option<(String, Vec<String>)> {
        match self {
            ElementShape::SelfClosing(tag) | ElementShape::StartTag(tag) => {
                Some((name_of(tag)?, attribute_names(tag)))
            }
            ElementShape::WithStartTag(element) => {
                ElementShape::StartTag(start_tag_of(element)?).name_and_attributes()
            }
            ElementShape::Other => None,
        }
    }
}
