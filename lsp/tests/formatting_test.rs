use dockerls_lsp::analyzer::{format_document, format_on_type, format_range, DockerAnalyzer, FormatterSettings};
use tower_lsp::lsp_types::{FormattingOptions, Position, Range, TextEdit};

fn spaces(tab_size: u32) -> FormattingOptions {
    FormattingOptions {
        tab_size,
        insert_spaces: true,
        ..Default::default()
    }
}

fn apply(content: &str, mut edits: Vec<TextEdit>) -> String {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect();
    let offset = |p: Position| line_starts[p.line as usize] + p.character as usize;
    edits.sort_by_key(|e| std::cmp::Reverse(offset(e.range.start)));
    let mut out = content.to_string();
    for edit in edits {
        out.replace_range(offset(edit.range.start)..offset(edit.range.end), &edit.new_text);
    }
    out
}

fn format(content: &str, options: &FormattingOptions, settings: &FormatterSettings) -> String {
    let result = DockerAnalyzer::new().analyze(content);
    apply(content, format_document(&result.model, options, settings))
}

const MESSY: &str = "FROM alpine\n  RUN a \\\nb \\\n\t\tc\n   \n  # note\n";

#[test]
fn test_document_formatting_indents_continuations() {
    let formatted = format(MESSY, &spaces(4), &FormatterSettings::default());
    assert_eq!(formatted, "FROM alpine\nRUN a \\\n    b \\\n    c\n\n# note\n");
}

#[test]
fn test_formatting_is_idempotent() {
    let settings = FormatterSettings::default();
    let once = format(MESSY, &spaces(2), &settings);
    let result = DockerAnalyzer::new().analyze(&once);
    assert!(format_document(&result.model, &spaces(2), &settings).is_empty());
}

#[test]
fn test_tabs_when_spaces_are_off() {
    let options = FormattingOptions {
        tab_size: 4,
        insert_spaces: false,
        ..Default::default()
    };
    let formatted = format("FROM alpine\nRUN a \\\n  b\n", &options, &FormatterSettings::default());
    assert_eq!(formatted, "FROM alpine\nRUN a \\\n\tb\n");
}

#[test]
fn test_ignore_multiline_instructions_keeps_continuations() {
    let settings = FormatterSettings {
        ignore_multiline_instructions: true,
    };
    let formatted = format(MESSY, &spaces(4), &settings);
    assert_eq!(formatted, "FROM alpine\nRUN a \\\nb \\\n\t\tc\n\n# note\n");
}

#[test]
fn test_range_formatting_touches_only_selected_lines() {
    let content = "  FROM alpine\n  RUN a\n  RUN b\n";
    let result = DockerAnalyzer::new().analyze(content);
    let range = Range::new(Position::new(1, 0), Position::new(2, 0));
    let edits = format_range(&result.model, range, &spaces(4), &FormatterSettings::default());
    assert_eq!(edits.len(), 1);
    assert_eq!(apply(content, edits), "  FROM alpine\nRUN a\n  RUN b\n");
}

#[test]
fn test_on_type_newline_after_continuation() {
    let content = "FROM alpine\nRUN a \\\n";
    let result = DockerAnalyzer::new().analyze(content);
    let edits = format_on_type(
        &result.model,
        Position::new(2, 0),
        "\n",
        &spaces(2),
        &FormatterSettings::default(),
    );
    assert_eq!(apply(content, edits), "FROM alpine\nRUN a \\\n  ");

    let content = "FROM alpine\nRUN a\n";
    let result = DockerAnalyzer::new().analyze(content);
    let edits = format_on_type(
        &result.model,
        Position::new(2, 0),
        "\n",
        &spaces(2),
        &FormatterSettings::default(),
    );
    assert!(edits.is_empty());
}
