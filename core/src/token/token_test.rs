#[cfg(test)]
mod tests {
    use crate::text::{Document, Span};
    use crate::token::{Dockerfile, Keyword};

    fn parse(text: &str) -> (Document, Dockerfile) {
        let doc = Document::new(text);
        let file = Dockerfile::parse(&doc);
        (doc, file)
    }

    #[test]
    fn basic_instructions() {
        let (doc, file) = parse("FROM alpine\nRUN echo hi\n");
        assert_eq!(file.instructions.len(), 2);
        let from = &file.instructions[0];
        assert_eq!(from.kind, Keyword::From);
        assert_eq!(doc.slice(from.keyword_span), "FROM");
        assert_eq!(doc.slice(from.span), "FROM alpine");
        let run = &file.instructions[1];
        assert_eq!(run.arguments.len(), 2);
        assert_eq!(run.arguments[1].text(), "hi");
        assert_eq!(doc.slice(run.arguments[1].span()), "hi");
    }

    #[test]
    fn keyword_is_case_insensitive() {
        for kw in ["from", "From", "fRoM", "FROM"] {
            let (_, file) = parse(&format!("{kw} alpine"));
            assert_eq!(file.instructions[0].kind, Keyword::From);
            assert_eq!(file.instructions[0].keyword, kw);
        }
        let (_, file) = parse("FROMM alpine");
        assert_eq!(file.instructions[0].kind, Keyword::Unknown);
    }

    #[test]
    fn continuation_joins_arguments_across_lines() {
        let (doc, file) = parse("RUN apt-get \\\n    install \\\n    curl");
        let run = &file.instructions[0];
        let texts: Vec<_> = run.arguments.iter().map(|a| a.text()).collect();
        assert_eq!(texts, vec!["apt-get", "install", "curl"]);
        assert_eq!(doc.slice(run.arguments[2].span()), "curl");
        assert_eq!(doc.range(run.span).end.line, 2);
    }

    #[test]
    fn continuation_inside_token_spans_lines() {
        let (doc, file) = parse("EXPOSE 80\\\n80");
        let arg = &file.instructions[0].arguments[0];
        assert_eq!(arg.text(), "8080");
        assert_eq!(doc.slice(arg.span()), "80\\\n80");
    }

    #[test]
    fn keyword_split_by_continuation() {
        let (_, file) = parse("FR\\\nOM alpine");
        assert_eq!(file.instructions[0].kind, Keyword::From);
        assert_eq!(file.instructions[0].keyword, "FROM");
    }

    #[test]
    fn empty_continuation_lines_and_comments_are_recorded() {
        let text = "RUN a \\\n\n   \n# note\n b";
        let (doc, file) = parse(text);
        assert_eq!(file.instructions.len(), 1);
        let run = &file.instructions[0];
        assert_eq!(run.empty_continuation_lines.len(), 2);
        assert_eq!(doc.line_of(run.empty_continuation_lines[1].start), 2);
        assert_eq!(file.comments.len(), 1);
        assert_eq!(file.comments[0].text, "note");
        let texts: Vec<_> = run.arguments.iter().map(|a| a.text()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn backtick_escape_directive() {
        let (_, file) = parse("# escape=`\nFROM windows\nRUN dir `\n  c:\\");
        assert!(file.escape.declared_explicitly);
        assert_eq!(file.escape.character, '`');
        assert_eq!(file.instructions.len(), 2);
        let run = &file.instructions[1];
        assert_eq!(run.arguments.last().map(|a| a.text()), Some("c:\\"));
    }

    #[test]
    fn directives_stop_at_first_other_line() {
        let (_, file) = parse("# syntax=docker/dockerfile:1\n# escape=`\n\n# check=skip\nFROM a");
        assert_eq!(file.directives.len(), 2);
        assert_eq!(file.directives[0].name, "syntax");
        assert_eq!(file.directives[0].value, "docker/dockerfile:1");
        assert_eq!(file.comments.len(), 3);
    }

    #[test]
    fn directive_after_instruction_is_a_comment() {
        let (_, file) = parse("FROM a\n# escape=`");
        assert!(file.directives.is_empty());
        assert_eq!(file.escape.character, '\\');
        assert_eq!(file.comments.len(), 1);
    }

    #[test]
    fn invalid_escape_keeps_default() {
        let (_, file) = parse("# escape=v\nFROM a");
        assert_eq!(file.directives.len(), 1);
        assert_eq!(file.escape.character, '\\');
        assert!(!file.escape.declared_explicitly);
    }

    #[test]
    fn escape_directive_value_is_not_a_continuation() {
        let (_, file) = parse("# escape=\\\nFROM a");
        assert_eq!(file.directives[0].value, "\\");
        assert_eq!(file.instructions.len(), 1);
    }

    #[test]
    fn keyword_only_at_eof() {
        let (doc, file) = parse("FROM a\nEXPOSE");
        let expose = &file.instructions[1];
        assert!(expose.arguments.is_empty());
        assert_eq!(expose.span, Span::new(7, 13));
        assert_eq!(doc.slice(expose.span), "EXPOSE");
    }

    #[test]
    fn crlf_buffers() {
        let (doc, file) = parse("FROM a\r\nRUN \\\r\n  b\r\n");
        assert_eq!(file.instructions.len(), 2);
        assert_eq!(file.instructions[1].arguments[0].text(), "b");
        assert_eq!(doc.range(file.instructions[1].arguments[0].span()).start.line, 2);
    }

    #[test]
    fn onbuild_trigger_is_tokenized() {
        let (doc, file) = parse("ONBUILD copy . /app");
        let trigger = file.instructions[0].onbuild_trigger().unwrap();
        assert_eq!(trigger.kind, Keyword::Copy);
        assert_eq!(doc.slice(trigger.keyword_span), "copy");
        assert_eq!(trigger.arguments.len(), 2);
        assert_eq!(doc.slice(trigger.arguments[1].span()), "/app");
    }

    #[test]
    fn flags_and_positionals() {
        let (doc, file) = parse("COPY --from=build --chown=1 a b");
        let copy = &file.instructions[0];
        let flags = copy.flags();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].name, "from");
        assert_eq!(flags[0].value.as_deref(), Some("build"));
        assert_eq!(doc.slice(flags[0].name_span), "from");
        assert_eq!(doc.slice(flags[0].value_span.unwrap()), "build");
        assert_eq!(copy.positional().len(), 2);
        assert_eq!(copy.positional_region().as_str(), "a b");
    }

    #[test]
    fn run_does_not_read_flags() {
        let (_, file) = parse("RUN --mount=type=cache ls");
        assert!(file.instructions[0].flags().is_empty());
        assert_eq!(file.instructions[0].positional().len(), 2);
    }
}
