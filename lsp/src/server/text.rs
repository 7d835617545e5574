use ropey::Rope;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

/// Rope char index of an editor position (UTF-16 columns), clamped to the line content.
pub(crate) fn position_to_char_idx(text: &Rope, pos: Position) -> usize {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return text.len_chars();
    }
    let line_start = text.line_to_char(line_idx);
    let line = text.line(line_idx);
    let mut content_len = line.len_chars();
    while content_len > 0 && matches!(line.char(content_len - 1), '\n' | '\r') {
        content_len -= 1;
    }
    let start_cu = text.char_to_utf16_cu(line_start);
    let end_cu = text.char_to_utf16_cu(line_start + content_len);
    let target = (start_cu + pos.character as usize).min(end_cu);
    text.utf16_cu_to_char(target)
}

/// Applies one content change; a change without a range replaces the whole buffer.
pub(crate) fn apply_change(text: &mut Rope, change: &TextDocumentContentChangeEvent) {
    let Some(range) = &change.range else {
        *text = Rope::from_str(&change.text);
        return;
    };
    let a = position_to_char_idx(text, range.start);
    let b = position_to_char_idx(text, range.end);
    let (start, end) = (a.min(b), a.max(b));
    if start != end {
        text.remove(start..end);
    }
    if !change.text.is_empty() {
        text.insert(start, &change.text);
    }
}

/// Applies a `didChange` batch in order.
pub(crate) fn apply_changes(text: &mut Rope, changes: Vec<TextDocumentContentChangeEvent>) {
    if let [only] = changes.as_slice() {
        if only.range.is_none() {
            *text = Rope::from_str(&only.text);
            return;
        }
    }
    for change in &changes {
        apply_change(text, change);
    }
}
