//! Locating the `///` documentation comment around a source offset.
//!
//! A documentation comment is a run of consecutive lines whose first
//! non-blank characters are `///` (but not `////`).  The run is parsed as a
//! whole, so offsets inside the tree are relative to the start of the run's
//! first line.

use rowan::TextSize;

use super::{SyntaxNode, parse};

/// A parsed documentation comment.
#[derive(Debug, Clone)]
pub struct DocComment {
    root: SyntaxNode,
    /// Byte offset of the comment's first line within the source.
    start: usize,
    attached: bool,
}

struct Line {
    start: usize,
    /// End of the line content, excluding the line break.
    content_end: usize,
}

fn lines(source: &str) -> Vec<Line> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            let content = line.strip_suffix('\n').unwrap_or(line);
            let content = content.strip_suffix('\r').unwrap_or(content);
            Line {
                start,
                content_end: start + content.len(),
            }
        })
        .collect()
}

/// Byte offset just past the `///` marker, if `line` is a doc comment line.
fn doc_marker_end(source: &str, line: &Line) -> Option<usize> {
    let content = &source[line.start..line.content_end];
    let trimmed = content.trim_start();
    if trimmed.starts_with("///") && !trimmed.starts_with("////") {
        Some(line.start + (content.len() - trimmed.len()) + 3)
    } else {
        None
    }
}

/// Whether a code element follows the last line of a comment.
///
/// Blank lines, ordinary `//` comments and preprocessor lines are skipped.
fn precedes_code(source: &str, following: &[Line]) -> bool {
    following
        .iter()
        .map(|line| source[line.start..line.content_end].trim())
        .any(|text| !text.is_empty() && !text.starts_with("//") && !text.starts_with('#'))
}

impl DocComment {
    /// Find the documentation comment containing `offset`.
    ///
    /// Returns `None` when the offset is not inside a `///` line, or sits in
    /// the indentation or the `///` marker itself.
    pub fn find(source: &str, offset: usize) -> Option<Self> {
        if offset > source.len() {
            return None;
        }

        let lines = lines(source);
        let current = lines
            .iter()
            .position(|line| line.start <= offset && offset <= line.content_end)?;

        let marker_end = doc_marker_end(source, &lines[current])?;
        if offset < marker_end {
            return None;
        }

        let mut first = current;
        while first > 0 && doc_marker_end(source, &lines[first - 1]).is_some() {
            first -= 1;
        }
        let mut last = current;
        while last + 1 < lines.len() && doc_marker_end(source, &lines[last + 1]).is_some() {
            last += 1;
        }

        let start = lines[first].start;
        let end = lines[last].content_end;

        Some(Self {
            root: parse(&source[start..end]),
            start,
            attached: precedes_code(source, &lines[last + 1..]),
        })
    }

    /// The `DOC_COMMENT` root node.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.root
    }

    /// Byte offset of the comment within the source it was found in.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Map a source offset into the tree, if it falls inside the comment.
    pub fn tree_offset(&self, offset: usize) -> Option<TextSize> {
        let local = offset.checked_sub(self.start)?;
        let local = TextSize::try_from(local).ok()?;
        (local <= self.root.text_range().end()).then_some(local)
    }
}
