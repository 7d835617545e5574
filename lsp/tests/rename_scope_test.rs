use dockerls_lsp::analyzer::DockerAnalyzer;
use tower_lsp::lsp_types::{HoverContents, Position, Range, TextEdit, Url, WorkspaceEdit};

const SHADOWED: &str = "ARG v=1\nFROM a\nARG v=2\nRUN echo $v\nFROM a\nRUN echo $v";

fn uri() -> Url {
    Url::parse("file:///work/Dockerfile").unwrap()
}

fn range(line: u32, start: u32, end: u32) -> Range {
    Range::new(Position::new(line, start), Position::new(line, end))
}

fn edited_ranges(edit: &WorkspaceEdit) -> Vec<Range> {
    let changes = edit.changes.as_ref().expect("changes");
    let mut ranges: Vec<Range> = changes[&uri()].iter().map(|e: &TextEdit| e.range).collect();
    ranges.sort_by_key(|r| (r.start.line, r.start.character));
    ranges
}

fn hover_text(analyzer: &DockerAnalyzer, content: &str, position: Position) -> String {
    let result = analyzer.analyze(content);
    match analyzer.hover(&result.model, position).expect("hover").contents {
        HoverContents::Markup(m) => m.value,
        other => panic!("unexpected hover {:?}", other),
    }
}

#[test]
fn test_stage_shadowing_resolves_per_stage() {
    let analyzer = DockerAnalyzer::new();
    assert_eq!(hover_text(&analyzer, SHADOWED, Position::new(3, 10)), "```\nv=2\n```");
    assert_eq!(hover_text(&analyzer, SHADOWED, Position::new(5, 10)), "```\nv=1\n```");
}

#[test]
fn test_rename_stays_inside_the_resolved_binding() {
    let analyzer = DockerAnalyzer::new();
    let result = analyzer.analyze(SHADOWED);

    let edit = analyzer
        .rename(&result.model, &uri(), Position::new(3, 10), "w")
        .expect("rename in first stage");
    assert_eq!(edited_ranges(&edit), vec![range(2, 4, 5), range(3, 10, 11)]);

    let edit = analyzer
        .rename(&result.model, &uri(), Position::new(5, 10), "w")
        .expect("rename in second stage");
    assert_eq!(edited_ranges(&edit), vec![range(0, 4, 5), range(5, 10, 11)]);
}

#[test]
fn test_rename_rejects_invalid_names() {
    let analyzer = DockerAnalyzer::new();
    let result = analyzer.analyze(SHADOWED);
    assert!(analyzer.rename(&result.model, &uri(), Position::new(3, 10), "1x").is_none());
    assert!(analyzer.rename(&result.model, &uri(), Position::new(3, 10), "a-b").is_none());
    assert!(analyzer.rename(&result.model, &uri(), Position::new(1, 1), "x").is_none());
}

#[test]
fn test_references_and_definition_for_variables() {
    let analyzer = DockerAnalyzer::new();
    let result = analyzer.analyze(SHADOWED);

    let refs = analyzer.references(&result.model, &uri(), Position::new(3, 10), false);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].range, range(3, 10, 11));

    let refs = analyzer.references(&result.model, &uri(), Position::new(3, 10), true);
    assert_eq!(refs.len(), 2);

    let def = analyzer
        .definition(&result.model, &uri(), Position::new(5, 10))
        .expect("definition");
    assert_eq!(def.range, range(0, 4, 5));
}

#[test]
fn test_stage_rename_updates_copy_from() {
    let analyzer = DockerAnalyzer::new();
    let content = "FROM alpine AS build\nRUN make\nFROM scratch\nCOPY --from=build /out /\n";
    let result = analyzer.analyze(content);

    let def = analyzer
        .definition(&result.model, &uri(), Position::new(3, 13))
        .expect("stage definition");
    assert_eq!(def.range, range(0, 15, 20));

    let edit = analyzer
        .rename(&result.model, &uri(), Position::new(0, 16), "builder")
        .expect("stage rename");
    assert_eq!(edited_ranges(&edit), vec![range(0, 15, 20), range(3, 12, 17)]);

    assert!(analyzer
        .rename(&result.model, &uri(), Position::new(0, 16), "bad name")
        .is_none());
}
