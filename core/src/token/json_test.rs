#[cfg(test)]
mod tests {
    use crate::text::{Document, Span};
    use crate::token::json::{JsonError, parse_string_array};
    use crate::token::{Dockerfile, Instruction};

    fn first(text: &str) -> (Document, Instruction) {
        let doc = Document::new(text);
        let file = Dockerfile::parse(&doc);
        let inst = file.instructions.into_iter().next().unwrap();
        (doc, inst)
    }

    #[test]
    fn parses_string_array() {
        let (doc, inst) = first(r#"CMD [ "a", "b c" ]"#);
        let array = parse_string_array(&inst.region, '"', '\\').unwrap();
        let values: Vec<_> = array.strings.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b c"]);
        assert_eq!(doc.slice(array.strings[1].span), "\"b c\"");
        assert_eq!(doc.slice(array.span), r#"[ "a", "b c" ]"#);
    }

    #[test]
    fn empty_array() {
        let (_, inst) = first("SHELL []");
        let array = parse_string_array(&inst.region, '"', '\\').unwrap();
        assert!(array.strings.is_empty());
    }

    #[test]
    fn escapes_are_decoded() {
        let (_, inst) = first(r#"CMD ["a\"b", "\u0041\n"]"#);
        let array = parse_string_array(&inst.region, '"', '\\').unwrap();
        assert_eq!(array.strings[0].value, "a\"b");
        assert_eq!(array.strings[1].value, "A\n");
    }

    #[test]
    fn not_an_array() {
        let (_, inst) = first("SHELL sh -c");
        assert_eq!(
            parse_string_array(&inst.region, '"', '\\'),
            Err(JsonError::NotAnArray)
        );
    }

    #[test]
    fn unexpected_character_is_located() {
        let (doc, inst) = first(r#"VOLUME ["/a" "/b"]"#);
        match parse_string_array(&inst.region, '"', '\\') {
            Err(JsonError::Unexpected { span, found }) => {
                assert_eq!(found, Some('"'));
                assert_eq!(doc.slice(span), "\"");
                assert_eq!(span.start, 13);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn trailing_comma_and_garbage() {
        let (_, inst) = first(r#"VOLUME ["/a",]"#);
        assert!(matches!(
            parse_string_array(&inst.region, '"', '\\'),
            Err(JsonError::Unexpected { found: Some(']'), .. })
        ));
        let (_, inst) = first(r#"VOLUME ["/a"] x"#);
        assert!(matches!(
            parse_string_array(&inst.region, '"', '\\'),
            Err(JsonError::Unexpected { found: Some('x'), .. })
        ));
    }

    #[test]
    fn unterminated_reports_end() {
        let (doc, inst) = first(r#"VOLUME ["/a""#);
        match parse_string_array(&inst.region, '"', '\\') {
            Err(JsonError::Unexpected { span, found: None }) => {
                assert_eq!(span, Span::empty(doc.len()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn single_quoted_arrays() {
        let (_, inst) = first("CMD ['a', 'b']");
        assert!(parse_string_array(&inst.region, '"', '\\').is_err());
        let array = parse_string_array(&inst.region, '\'', '\\').unwrap();
        assert_eq!(array.strings.len(), 2);
    }

    #[test]
    fn array_across_continuation() {
        let (_, inst) = first("CMD [\"a\", \\\n  \"b\"]");
        let array = parse_string_array(&inst.region, '"', '\\').unwrap();
        assert_eq!(array.strings[1].value, "b");
    }

    #[test]
    fn unknown_escapes_keep_the_character() {
        let (_, inst) = first(r#"VOLUME ["C:\data", "a\/b", "\u12"]"#);
        let array = parse_string_array(&inst.region, '"', '\\').unwrap();
        let values: Vec<_> = array.strings.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["C:data", "a/b", "u12"]);
    }

    #[test]
    fn backtick_escape_inside_strings() {
        let (_, inst) = first("VOLUME [\"a`\"b\", \"C:\\data\", \"`n\"]");
        let array = parse_string_array(&inst.region, '"', '`').unwrap();
        let values: Vec<_> = array.strings.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["a\"b", "C:\\data", "n"]);
        assert!(parse_string_array(&inst.region, '"', '\\').is_err());
    }
}
