//! Tolerant parser for the XML inside a documentation comment.
//!
//! The input is the raw comment text, `///` prefixes included.  Parsing
//! never fails: the comment is usually half-typed while completion runs, so
//! unfinished constructs are kept in the shapes the resolver expects:
//!
//! - `<name attr="v" />` and an interrupted `<name attr="v` both become
//!   `XML_EMPTY_ELEMENT`
//! - `<name>…</name>` becomes `XML_ELEMENT(XML_START_TAG, …, XML_END_TAG)`
//! - a bare `<` gets an empty `XML_NAME`
//! - attribute values stop at their closing quote, `<`, or end of line
//! - below [`MAX_ELEMENT_DEPTH`] open elements, a further `<` is plain text
//!
//! The tree text always equals the input.

use rowan::{GreenNodeBuilder, Language};

use super::SyntaxKind::{self, *};
use super::{DocXmlLanguage, SyntaxNode};

/// Deepest element nesting the parser builds.  Element parsing recurses per
/// open start tag, so the depth bounds stack use.
pub const MAX_ELEMENT_DEPTH: usize = 256;

/// Parse documentation comment text into a `DOC_COMMENT` tree.
pub fn parse(text: &str) -> SyntaxNode {
    let mut parser = Parser {
        text,
        pos: 0,
        line_start: true,
        builder: GreenNodeBuilder::new(),
        open_elements: Vec::new(),
    };

    parser.builder.start_node(DOC_COMMENT.into());
    parser.parse_content();
    parser.builder.finish_node();

    SyntaxNode::new_root(parser.builder.finish())
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    /// The previous token ended a line, so a `///` prefix may follow.
    line_start: bool,
    builder: GreenNodeBuilder<'static>,
    /// Names of the elements whose start tags are open, innermost last.
    open_elements: Vec<String>,
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | ':')
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn at(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn bump(&mut self, kind: SyntaxKind, len: usize) {
        let token = &self.text[self.pos..self.pos + len];
        self.builder.token(DocXmlLanguage::kind_to_raw(kind), token);
        self.line_start = token.ends_with('\n');
        self.pos += len;
    }

    /// Length of the line break at the cursor, if any.
    fn newline_len(&self) -> Option<usize> {
        if self.at("\r\n") {
            Some(2)
        } else if self.at("\n") {
            Some(1)
        } else {
            None
        }
    }

    /// Length of an indented `///` prefix at the cursor, if the cursor is at
    /// the start of a line.
    fn exterior_len(&self) -> Option<usize> {
        if !self.line_start {
            return None;
        }
        let rest = self.rest();
        let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        rest[indent..].starts_with("///").then_some(indent + 3)
    }

    /// Byte length of the run of characters satisfying `pred`.
    fn run_len(&self, pred: impl Fn(char) -> bool) -> usize {
        self.rest()
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest().len())
    }

    /// Length of a text run, stopping at `<` or a line break.
    fn text_len(&self) -> usize {
        let rest = self.rest();
        let mut end = rest.find(['<', '\n']).unwrap_or(rest.len());
        if end > 0 && rest[..end].ends_with('\r') && rest[end..].starts_with('\n') {
            end -= 1;
        }
        end
    }

    /// Length of a delimited construct (`<!-- … -->`), or the rest of the
    /// input when it is unterminated.
    fn delimited_len(&self, close: &str) -> usize {
        self.rest()
            .find(close)
            .map(|idx| idx + close.len())
            .unwrap_or(self.rest().len())
    }

    fn peek_end_tag_name(&self) -> &str {
        let rest = &self.rest()[2..];
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !is_name_char(ch))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        &rest[..len]
    }

    // ─── Content ────────────────────────────────────────────────────────

    /// Parse element content or root content.
    ///
    /// Returns `true` when stopped at an end tag that belongs to the
    /// innermost open element, `false` at end of input or at an end tag
    /// that closes an outer element.
    fn parse_content(&mut self) -> bool {
        let mut text_open = false;

        let owns_end_tag = loop {
            if self.is_eof() {
                break false;
            }

            if let Some(len) = self.exterior_len() {
                self.open_text(&mut text_open);
                self.bump(DOC_EXTERIOR, len);
                continue;
            }

            if self.at("</") {
                if let Some((current, outer)) = self.open_elements.split_last() {
                    let name = self.peek_end_tag_name();
                    let closes_outer = name != current && outer.iter().any(|open| open == name);
                    break !closes_outer;
                }
                // An end tag with nothing open stays in the root.
                self.close_text(&mut text_open);
                self.parse_end_tag();
                continue;
            }

            if self.at("<!--") || self.at("<![CDATA[") {
                let close = if self.at("<!--") { "-->" } else { "]]>" };
                let len = self.delimited_len(close);
                self.open_text(&mut text_open);
                self.bump(TEXT_LITERAL, len);
                continue;
            }

            if self.at("<") && self.open_elements.len() < MAX_ELEMENT_DEPTH {
                self.close_text(&mut text_open);
                self.parse_element();
                continue;
            }

            self.open_text(&mut text_open);
            if let Some(len) = self.newline_len() {
                self.bump(NEWLINE, len);
            } else {
                let len = self.text_len().max(1);
                self.bump(TEXT_LITERAL, len);
            }
        };

        self.close_text(&mut text_open);
        owns_end_tag
    }

    fn open_text(&mut self, text_open: &mut bool) {
        if !*text_open {
            self.builder.start_node(XML_TEXT.into());
            *text_open = true;
        }
    }

    fn close_text(&mut self, text_open: &mut bool) {
        if *text_open {
            self.builder.finish_node();
            *text_open = false;
        }
    }

    // ─── Tags ───────────────────────────────────────────────────────────

    /// Whitespace, line breaks and `///` prefixes inside a tag.
    fn skip_tag_trivia(&mut self) {
        loop {
            if let Some(len) = self.exterior_len() {
                self.bump(DOC_EXTERIOR, len);
            } else if let Some(len) = self.newline_len() {
                self.bump(WHITESPACE, len);
            } else {
                let len = self.run_len(|ch| ch == ' ' || ch == '\t' || ch == '\r');
                if len == 0 {
                    break;
                }
                self.bump(WHITESPACE, len);
            }
        }
    }

    /// `XML_NAME`, left empty when no name follows.
    fn parse_name(&mut self) {
        self.builder.start_node(XML_NAME.into());
        if self.peek().is_some_and(is_name_start) {
            let len = self.run_len(is_name_char);
            self.bump(IDENT, len);
        }
        self.builder.finish_node();
    }

    fn parse_element(&mut self) {
        let checkpoint = self.builder.checkpoint();
        let name_start = self.pos + 1;

        self.bump(LESS_THAN, 1);
        self.parse_name();
        let name = self.text[name_start..self.pos].to_string();

        loop {
            self.skip_tag_trivia();

            if self.is_eof() || self.at("<") {
                // Interrupted tag: keep it as an unterminated empty element.
                self.builder.start_node_at(checkpoint, XML_EMPTY_ELEMENT.into());
                self.builder.finish_node();
                return;
            }

            if self.at("/>") {
                self.builder.start_node_at(checkpoint, XML_EMPTY_ELEMENT.into());
                self.bump(SLASH_GREATER_THAN, 2);
                self.builder.finish_node();
                return;
            }

            if self.at(">") {
                self.builder.start_node_at(checkpoint, XML_ELEMENT.into());
                self.builder.start_node_at(checkpoint, XML_START_TAG.into());
                self.bump(GREATER_THAN, 1);
                self.builder.finish_node();

                self.open_elements.push(name);
                let owns_end_tag = self.parse_content();
                self.open_elements.pop();

                if owns_end_tag {
                    self.parse_end_tag();
                }
                self.builder.finish_node();
                return;
            }

            match self.peek() {
                Some(ch) if is_name_start(ch) => self.parse_attribute(),
                Some(ch) => self.bump(ERROR, ch.len_utf8()),
                None => {}
            }
        }
    }

    fn parse_attribute(&mut self) {
        self.builder.start_node(XML_ATTRIBUTE.into());

        self.builder.start_node(XML_NAME.into());
        let len = self.run_len(is_name_char);
        self.bump(IDENT, len);
        self.builder.finish_node();

        let spaces = self.run_len(|ch| ch == ' ' || ch == '\t');
        if self.rest()[spaces..].starts_with('=') {
            if spaces > 0 {
                self.bump(WHITESPACE, spaces);
            }
            self.bump(EQUALS, 1);

            let spaces = self.run_len(|ch| ch == ' ' || ch == '\t');
            if spaces > 0 {
                self.bump(WHITESPACE, spaces);
            }

            if let Some(quote) = self.peek().filter(|ch| matches!(ch, '"' | '\'')) {
                self.bump(QUOTE, 1);

                let rest = self.rest();
                let mut len = rest.find([quote, '<', '\n']).unwrap_or(rest.len());
                if rest[..len].ends_with('\r') && rest[len..].starts_with('\n') {
                    len -= 1;
                }
                if len > 0 {
                    self.bump(TEXT_LITERAL, len);
                }

                if self.peek() == Some(quote) {
                    self.bump(QUOTE, 1);
                }
            }
        }

        self.builder.finish_node();
    }

    fn parse_end_tag(&mut self) {
        self.builder.start_node(XML_END_TAG.into());
        self.bump(LESS_THAN_SLASH, 2);
        self.parse_name();
        self.skip_tag_trivia();
        if self.at(">") {
            self.bump(GREATER_THAN, 1);
        }
        self.builder.finish_node();
    }
}
