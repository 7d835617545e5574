#[cfg(test)]
mod tests {
    use crate::scope::{Scope, ScopeTable, Symbol, scan_references};
    use crate::text::Document;
    use crate::token::Dockerfile;

    fn build(text: &str) -> (Document, ScopeTable) {
        let doc = Document::new(text);
        let file = Dockerfile::parse(&doc);
        let table = ScopeTable::build(&file);
        (doc, table)
    }

    fn offset_of(doc: &Document, needle: &str, nth: usize) -> usize {
        doc.text().match_indices(needle).nth(nth).map(|(i, _)| i).unwrap()
    }

    #[test]
    fn scans_plain_and_braced_references() {
        let refs = scan_references("$a ${b} ${c:-$d} '$e' \\$f", '\\');
        let names: Vec<_> = refs
            .iter()
            .map(|r| &"$a ${b} ${c:-$d} '$e' \\$f"[r.name_start..r.name_end])
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!((refs[1].start, refs[1].end), (3, 7));
    }

    #[test]
    fn stage_arg_shadows_global_and_falls_back() {
        let text = "ARG v=1\nFROM a\nARG v=2\nRUN echo $v\nFROM a\nRUN echo $v\n";
        let (doc, table) = build(text);
        assert_eq!(table.stages.len(), 2);
        assert_eq!(table.references.len(), 2);

        let first = &table.references[0];
        assert_eq!(first.scope, Scope::Stage(0));
        assert_eq!(table.effective_value(first).as_deref(), Some("2"));

        let second = &table.references[1];
        assert_eq!(second.scope, Scope::Stage(1));
        assert_eq!(table.effective_value(second).as_deref(), Some("1"));

        let (symbol, _) = table.symbol_at(offset_of(&doc, "$v", 0) + 1).unwrap();
        assert_eq!(
            symbol,
            Symbol::Variable {
                name: "v".into(),
                scope: Scope::Stage(0)
            }
        );
        let stage_occurrences = table.occurrences(&symbol);
        assert_eq!(stage_occurrences.len(), 2);
        assert!(stage_occurrences.iter().all(|o| o.span.start > 8 && o.span.end < 40));

        let (global, _) = table.symbol_at(4).unwrap();
        let global_occurrences = table.occurrences(&global);
        assert_eq!(global_occurrences.len(), 2);
        assert_eq!(global_occurrences[0].span.start, 4);
        assert!(global_occurrences[0].declaration);
        assert_eq!(global_occurrences[1].span.start, offset_of(&doc, "$v", 1) + 1);
    }

    #[test]
    fn bindings_visible_from_next_instruction() {
        let (_, table) = build("FROM a\nENV x=1 y=$x\n");
        let y_ref = &table.references[0];
        assert_eq!(y_ref.name, "x");
        assert!(y_ref.binding.is_none());
    }

    #[test]
    fn from_references_see_only_globals() {
        let (_, table) = build("ARG base=alpine\nFROM $base\nARG base=debian\nFROM $base\n");
        let first = &table.references[0];
        let second = &table.references[1];
        assert!(first.in_from && second.in_from);
        assert_eq!(table.bindings[first.binding.unwrap()].scope, Scope::Global);
        assert_eq!(table.bindings[second.binding.unwrap()].scope, Scope::Global);
    }

    #[test]
    fn bare_stage_arg_inherits_global_value() {
        let (_, table) = build("ARG ver=3\nFROM a\nARG ver\nRUN echo ${ver}\n");
        let reference = &table.references[0];
        assert_eq!(
            table.bindings[reference.binding.unwrap()].scope,
            Scope::Stage(0)
        );
        assert_eq!(table.effective_value(reference).as_deref(), Some("3"));
    }

    #[test]
    fn arg_declares_only_first_token() {
        let (_, table) = build("ARG a=1 b=2\n");
        assert_eq!(table.bindings.len(), 1);
        assert_eq!(table.bindings[0].name, "a");
    }

    #[test]
    fn legacy_env_binding() {
        let (_, table) = build("FROM a\nENV PATH /usr/bin:$PATH\n");
        assert_eq!(table.bindings[0].name, "PATH");
        assert_eq!(table.bindings[0].value.as_deref(), Some("/usr/bin:$PATH"));
        assert_eq!(table.references.len(), 1);
    }

    #[test]
    fn quoted_env_value_resolves_escapes() {
        let (_, table) = build("FROM a\nENV x=\"p\\\"q\"\nRUN echo $x\n");
        assert_eq!(table.bindings[0].value.as_deref(), Some("p\"q"));
        assert_eq!(table.effective_value(&table.references[0]).as_deref(), Some("p\"q"));

        let (_, table) = build("# escape=`\nFROM a\nENV x=\"p`\"q\" y=C:\\data\nRUN echo $x $y\n");
        assert_eq!(table.effective_value(&table.references[0]).as_deref(), Some("p\"q"));
        assert_eq!(table.effective_value(&table.references[1]).as_deref(), Some("C:\\data"));
    }

    #[test]
    fn stage_names_are_symbols() {
        let text = "FROM golang AS Build\nFROM build AS test\nFROM alpine\nCOPY --from=build /a /b\n";
        let (doc, table) = build(text);
        assert_eq!(table.stages[0].name.as_deref(), Some("Build"));
        assert_eq!(table.stage_references.len(), 2);
        assert!(table.stage_references.iter().all(|r| r.stage == Some(0)));

        let offset = offset_of(&doc, "build", 1);
        let (symbol, _) = table.symbol_at(offset).unwrap();
        assert_eq!(symbol, Symbol::Stage(0));
        assert_eq!(table.occurrences(&symbol).len(), 3);
        assert_eq!(
            table.definition_at(offset),
            table.stages[0].name_span
        );
    }

    #[test]
    fn numeric_copy_from_resolves_without_rename() {
        let (_, table) = build("FROM a\nFROM b\nCOPY --from=0 /x /y\n");
        assert_eq!(table.stage_references[0].stage, Some(0));
        assert!(table.occurrences(&Symbol::Stage(0)).is_empty());
    }

    #[test]
    fn visible_bindings_at_cursor() {
        let text = "ARG g=1\nFROM a\nENV e=2\nRUN x\n";
        let (doc, table) = build(text);
        let in_run = offset_of(&doc, "x", 0);
        let names: Vec<_> = table.visible_at(in_run).iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["e", "g"]);

        let in_env = offset_of(&doc, "e=2", 0) + 2;
        let names: Vec<_> = table.visible_at(in_env).iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["g"]);

        let in_from = offset_of(&doc, "FROM a", 0) + 5;
        let names: Vec<_> = table.visible_at(in_from).iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["g"]);
    }

    #[test]
    fn onbuild_trigger_references_are_recorded_once() {
        let text = "FROM a\nARG v=1\nONBUILD RUN echo $v\n";
        let (doc, table) = build(text);
        assert_eq!(table.references.len(), 1);
        let reference = &table.references[0];
        assert_eq!(reference.span.start, offset_of(&doc, "$v", 0) + 1);
        assert_eq!(reference.binding, Some(0));
    }
}
