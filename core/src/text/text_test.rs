#[cfg(test)]
mod tests {
    use crate::text::{Document, Position, Range, Span, continuation_len, is_continuation};
    use crate::token::Dockerfile;

    #[test]
    fn line_starts_cover_all_terminators() {
        let doc = Document::new("a\nb\r\nc\rd");
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.line_text(0), "a");
        assert_eq!(doc.line_text(1), "b");
        assert_eq!(doc.line_text(2), "c");
        assert_eq!(doc.line_text(3), "d");
        assert_eq!(doc.line_start(3), 7);
    }

    #[test]
    fn trailing_newline_opens_empty_line() {
        let doc = Document::new("FROM a\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_text(1), "");
        assert_eq!(doc.position_at(7), Position::new(1, 0));
    }

    #[test]
    fn positions_use_utf16_columns() {
        let doc = Document::new("ENV a=😀b\nX");
        let b = doc.text().find('b').unwrap();
        assert_eq!(doc.position_at(b), Position::new(0, 8));
        assert_eq!(doc.offset_at(Position::new(0, 8)), b);
        assert_eq!(doc.offset_at(Position::new(1, 0)), doc.text().len() - 1);
    }

    #[test]
    fn offsets_are_clamped() {
        let doc = Document::new("FROM a\nRUN b");
        assert_eq!(doc.offset_at(Position::new(0, 99)), 6);
        assert_eq!(doc.offset_at(Position::new(9, 0)), doc.len());
        assert_eq!(doc.position_at(500), Position::new(1, 5));
    }

    #[test]
    fn range_round_trips_through_span() {
        let doc = Document::new("FROM alpine\nRUN echo");
        let span = Span::new(12, 15);
        let range = doc.range(span);
        assert_eq!(range, Range::new(Position::new(1, 0), Position::new(1, 3)));
        assert_eq!(doc.span_of(range), span);
    }

    #[test]
    fn widen_prefers_forward_then_backward() {
        let doc = Document::new("ab\ncd");
        assert_eq!(doc.widen(Span::empty(0)), Span::new(0, 1));
        assert_eq!(doc.widen(Span::empty(2)), Span::new(1, 2));
        assert_eq!(doc.widen(Span::empty(5)), Span::new(4, 5));
        assert_eq!(Document::new("").widen(Span::empty(0)), Span::empty(0));
    }

    #[test]
    fn continuation_lengths() {
        assert_eq!(continuation_len("a\\\nb", 1, '\\'), Some(2));
        assert_eq!(continuation_len("a\\ \t\r\nb", 1, '\\'), Some(5));
        assert_eq!(continuation_len("a\\\rb", 1, '\\'), Some(2));
        assert_eq!(continuation_len("a\\ b\n", 1, '\\'), None);
        assert_eq!(continuation_len("a`\nb", 1, '`'), Some(2));
        assert_eq!(continuation_len("a\\\nb", 1, '`'), None);
        assert!(!is_continuation("a\\", 1, '\\'));
    }

    fn shape(text: &str) -> Vec<(String, Vec<String>)> {
        let file = Dockerfile::parse(&Document::new(text));
        file.instructions
            .iter()
            .map(|inst| {
                let args = inst.arguments.iter().map(|a| a.text().to_string()).collect();
                (inst.keyword.clone(), args)
            })
            .collect()
    }

    #[test]
    fn line_breaks_inside_arguments_are_transparent() {
        let lines = ["RUN echo hello world", "ENV a=b c=d", "COPY --from=x src dst"];
        for (escape, prefix) in [('\\', ""), ('`', "# escape=`\n")] {
            for nl in ["\n", "\r\n"] {
                for line in lines {
                    let joined = format!("{prefix}{line}{nl}USER z{nl}");
                    let expected = shape(&joined);
                    assert_eq!(expected.len(), 2);

                    let keyword_end = line.find(' ').unwrap();
                    for at in keyword_end + 1..line.len() {
                        let broken = format!(
                            "{prefix}{}{escape}{nl}{}{nl}USER z{nl}",
                            &line[..at],
                            &line[at..]
                        );
                        assert_eq!(shape(&broken), expected, "{broken:?}");
                    }
                }
            }
        }
    }
}
