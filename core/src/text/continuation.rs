//! Escape-aware line continuation detection.

pub const DEFAULT_ESCAPE: char = '\\';

/// Length of the line terminator starting at `offset`, if any.
pub fn newline_len(text: &str, offset: usize) -> Option<usize> {
    match text.as_bytes().get(offset) {
        Some(b'\r') if text.as_bytes().get(offset + 1) == Some(&b'\n') => Some(2),
        Some(b'\r') | Some(b'\n') => Some(1),
        _ => None,
    }
}

/// Number of raw bytes a line continuation at `offset` occupies.
///
/// A continuation is the escape character, optional spaces or tabs, then a line terminator.
/// Returns `None` when `offset` does not start one. Never allocates.
pub fn continuation_len(text: &str, offset: usize, escape: char) -> Option<usize> {
    let rest = text.get(offset..)?;
    if !rest.starts_with(escape) {
        return None;
    }
    let bytes = text.as_bytes();
    let mut cursor = offset + escape.len_utf8();
    while matches!(bytes.get(cursor), Some(b' ') | Some(b'\t')) {
        cursor += 1;
    }
    let newline = newline_len(text, cursor)?;
    Some(cursor + newline - offset)
}

pub fn is_continuation(text: &str, offset: usize, escape: char) -> bool {
    continuation_len(text, offset, escape).is_some()
}
