//! Whitespace formatting: instruction and comment lines start at column zero, lines
//! continuing an instruction get one indentation unit.

use std::collections::HashSet;

use dockerls_core::text::{continuation_len, Document, Span};
use dockerls_core::Analysis;
use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{FormattingOptions, Position, Range, TextEdit};

use super::utils::{instruction_extent, lsp_range};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatterSettings {
    /// Leave the indentation of continuation lines alone.
    pub ignore_multiline_instructions: bool,
}

pub fn format_document(
    model: &Analysis,
    options: &FormattingOptions,
    settings: &FormatterSettings,
) -> Vec<TextEdit> {
    let lines = 0..model.document.line_count();
    format_lines(model, lines, options, settings)
}

/// Formats the lines `range` touches. A range ending at column zero excludes that line.
pub fn format_range(
    model: &Analysis,
    range: Range,
    options: &FormattingOptions,
    settings: &FormatterSettings,
) -> Vec<TextEdit> {
    let first = range.start.line as usize;
    let mut last = range.end.line as usize;
    if range.end.character == 0 && last > first {
        last -= 1;
    }
    let last = last.min(model.document.line_count().saturating_sub(1));
    if first > last {
        return Vec::new();
    }
    format_lines(model, first..last + 1, options, settings)
}

/// Indents the line a newline just created when the previous line ends in a continuation.
pub fn format_on_type(
    model: &Analysis,
    position: Position,
    ch: &str,
    options: &FormattingOptions,
    settings: &FormatterSettings,
) -> Vec<TextEdit> {
    if ch != "\n" || position.line == 0 || settings.ignore_multiline_instructions {
        return Vec::new();
    }
    let document = &model.document;
    let line = position.line as usize;
    if line >= document.line_count() {
        return Vec::new();
    }
    let escape = model.dockerfile.escape.character;
    let previous = document.line_span(line - 1);
    let text = document.text();
    let continues = text[previous.start..document.line_start(line)]
        .char_indices()
        .any(|(i, c)| c == escape && continuation_len(text, previous.start + i, escape).is_some());
    if !continues {
        return Vec::new();
    }
    let text = document.line_text(line);
    let current = text.len() - text.trim_start_matches([' ', '\t']).len();
    let unit = indent_unit(options);
    if text[..current] == unit {
        return Vec::new();
    }
    let start = document.line_start(line);
    let span = Span::new(start, start + current);
    vec![TextEdit::new(lsp_range(document, span), unit)]
}

fn format_lines(
    model: &Analysis,
    lines: std::ops::Range<usize>,
    options: &FormattingOptions,
    settings: &FormatterSettings,
) -> Vec<TextEdit> {
    let document = &model.document;
    let continuation = continuation_lines(model);
    let unit = indent_unit(options);
    lines
        .filter_map(|line| {
            if continuation.contains(&line) {
                if settings.ignore_multiline_instructions {
                    return None;
                }
                edit_indent(document, line, &unit)
            } else {
                edit_indent(document, line, "")
            }
        })
        .collect()
}

/// Lines after the first line of a multi-line instruction.
fn continuation_lines(model: &Analysis) -> HashSet<usize> {
    let document = &model.document;
    let mut lines = HashSet::new();
    for inst in &model.dockerfile.instructions {
        let first = document.line_of(inst.keyword_span.start);
        let last = document.line_of(instruction_extent(inst).end);
        lines.extend(first + 1..=last);
    }
    lines
}

fn indent_unit(options: &FormattingOptions) -> String {
    if options.insert_spaces {
        " ".repeat(options.tab_size.max(1) as usize)
    } else {
        "\t".to_string()
    }
}

/// Edit replacing the leading blanks of `line` with `indent`, if they differ.
fn edit_indent(document: &Document, line: usize, indent: &str) -> Option<TextEdit> {
    let text = document.line_text(line);
    let current = text.len() - text.trim_start_matches([' ', '\t']).len();
    // blank lines lose their whitespace entirely
    let indent = if current == text.len() { "" } else { indent };
    if &text[..current] == indent {
        return None;
    }
    let start = document.line_start(line);
    let span = Span::new(start, start + current);
    Some(TextEdit::new(lsp_range(document, span), indent.to_string()))
}
