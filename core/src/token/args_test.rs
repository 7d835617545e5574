#[cfg(test)]
mod tests {
    use crate::text::Document;
    use crate::token::{Dockerfile, Instruction, unquote};

    fn first(text: &str) -> (Document, Instruction) {
        let doc = Document::new(text);
        let file = Dockerfile::parse(&doc);
        let inst = file.instructions.into_iter().next().unwrap();
        (doc, inst)
    }

    #[test]
    fn quotes_group_whitespace() {
        let (_, inst) = first(r#"LABEL a="x y" b='c d'"#);
        let texts: Vec<_> = inst.arguments.iter().map(|a| a.text()).collect();
        assert_eq!(texts, vec![r#"a="x y""#, "b='c d'"]);
    }

    #[test]
    fn escape_in_double_quotes() {
        let (_, inst) = first(r#"ENV a="x\" y" b=1"#);
        assert_eq!(inst.arguments.len(), 2);
        assert_eq!(inst.arguments[0].text(), r#"a="x\" y""#);
    }

    #[test]
    fn single_quotes_ignore_escape() {
        let (_, inst) = first(r"ENV a='x\' b=1");
        assert_eq!(inst.arguments.len(), 2);
        assert_eq!(inst.arguments[0].text(), r"a='x\'");
    }

    #[test]
    fn escaped_space_stays_in_token() {
        let (_, inst) = first(r"ENV a=x\ y");
        assert_eq!(inst.arguments.len(), 1);
    }

    #[test]
    fn unterminated_quote_is_recorded() {
        let (doc, inst) = first("LABEL a=\"b c");
        let arg = &inst.arguments[0];
        let open = arg.open_quote.unwrap();
        assert_eq!(open.quote, '"');
        assert_eq!(&doc.text()[open.offset..], "\"b c");
        assert_eq!(arg.text(), "a=\"b c");
    }

    #[test]
    fn properties_split_on_first_equals() {
        let (doc, inst) = first("ENV a=b=c d=");
        let props = inst.properties();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "a");
        assert_eq!(props[0].value.as_deref(), Some("b=c"));
        assert_eq!(doc.slice(props[0].value_span.unwrap()), "b=c");
        assert_eq!(props[1].value.as_deref(), Some(""));
    }

    #[test]
    fn legacy_env_form() {
        let (doc, inst) = first("ENV PATH /usr/bin  /bin");
        let props = inst.properties();
        assert_eq!(props.len(), 1);
        assert!(props[0].legacy);
        assert_eq!(props[0].name, "PATH");
        assert_eq!(props[0].value.as_deref(), Some("/usr/bin  /bin"));
        assert_eq!(doc.slice(props[0].value_span.unwrap()), "/usr/bin  /bin");
    }

    #[test]
    fn bare_arg_has_no_value() {
        let (_, inst) = first("ARG version");
        let props = inst.properties();
        assert_eq!(props[0].name, "version");
        assert!(props[0].value.is_none());
    }

    #[test]
    fn flag_without_value() {
        let (doc, inst) = first("COPY --link --from= a b");
        let flags = inst.flags();
        assert_eq!(flags[0].name, "link");
        assert!(flags[0].value.is_none());
        assert_eq!(flags[1].value.as_deref(), Some(""));
        assert_eq!(doc.slice(flags[1].name_span), "from");
    }

    #[test]
    fn prefix_at_offset() {
        let (_, inst) = first("COPY --from=bui");
        let arg = &inst.arguments[0];
        assert_eq!(arg.prefix_at(arg.span().end), "--from=bui");
        assert_eq!(arg.prefix_at(arg.span().start + 4), "--fr");
    }

    #[test]
    fn unquote_segments() {
        assert_eq!(unquote(r#""a b""#, '\\'), "a b");
        assert_eq!(unquote(r#"x"y"'z'"#, '\\'), "xyz");
        assert_eq!(unquote("plain", '\\'), "plain");
    }

    #[test]
    fn unquote_resolves_escapes() {
        assert_eq!(unquote(r#""p\"q""#, '\\'), "p\"q");
        assert_eq!(unquote(r#"a\ b"#, '\\'), "a b");
        assert_eq!(unquote(r#"'p\'"#, '\\'), "p\\");
        assert_eq!(unquote(r#"trailing\"#, '\\'), "trailing\\");
        assert_eq!(unquote("\"p`\"q\"", '`'), "p\"q");
        assert_eq!(unquote(r#""C:\data""#, '`'), "C:\\data");
    }
}
