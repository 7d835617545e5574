#[cfg(test)]
mod tests {
    use ropey::Rope;
    use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent};

    use crate::server::text::{apply_changes, position_to_char_idx};

    fn change(range: Option<Range>, text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range,
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn utf16_columns_map_to_chars() {
        let rope = Rope::from_str("FROM a\nLABEL x=\u{1F600}y\n");
        // the emoji is two UTF-16 units but one char
        assert_eq!(position_to_char_idx(&rope, Position::new(1, 8)), 7 + 8);
        assert_eq!(position_to_char_idx(&rope, Position::new(1, 10)), 7 + 9);
        assert_eq!(position_to_char_idx(&rope, Position::new(1, 99)), 7 + 10);
        assert_eq!(position_to_char_idx(&rope, Position::new(9, 0)), rope.len_chars());
    }

    #[test]
    fn incremental_and_full_changes() {
        let mut rope = Rope::from_str("from alpine\nrun make\n");
        apply_changes(
            &mut rope,
            vec![
                change(Some(Range::new(Position::new(0, 0), Position::new(0, 4))), "FROM"),
                change(Some(Range::new(Position::new(1, 0), Position::new(1, 3))), "RUN"),
            ],
        );
        assert_eq!(rope.to_string(), "FROM alpine\nRUN make\n");

        apply_changes(&mut rope, vec![change(None, "FROM scratch\n")]);
        assert_eq!(rope.to_string(), "FROM scratch\n");
    }
}
