/// Utility functions for the XmlDocLSP server.
///
/// This module contains position/offset conversion between LSP positions
/// (line plus UTF-16 code unit column) and byte offsets into document text,
/// and client logging.
use tower_lsp::lsp_types::*;

use crate::Backend;

/// Convert an LSP position to a byte offset in `content`.
///
/// Columns past the end of a line clamp to the line end; lines past the end
/// of the document clamp to the end of the content.
pub fn position_to_offset(content: &str, position: Position) -> usize {
    let mut line_start = 0;
    for _ in 0..position.line {
        match content[line_start..].find('\n') {
            Some(idx) => line_start += idx + 1,
            None => return content.len(),
        }
    }

    let line = &content[line_start..];
    let line = line.split('\n').next().unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut units = 0u32;
    for (idx, ch) in line.char_indices() {
        if units >= position.character {
            return line_start + idx;
        }
        units += ch.len_utf16() as u32;
    }
    line_start + line.len()
}

/// Convert a byte offset in `content` to an LSP position.
pub fn offset_to_position(content: &str, offset: usize) -> Position {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &content[..offset];
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let line = before.matches('\n').count() as u32;
    let character = before[line_start..]
        .chars()
        .map(|ch| ch.len_utf16() as u32)
        .sum();

    Position::new(line, character)
}

impl Backend {
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
