use dockerls_core::diag::{self, Severity};
use dockerls_core::text::{self, Document, Span};
use dockerls_core::token::{Dockerfile, Instruction};
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, DiagnosticTag, MarkupContent, MarkupKind, NumberOrString,
    Position, Range,
};

pub(crate) const SOURCE: &str = "dockerls";

pub(crate) fn to_lsp_position(p: text::Position) -> Position {
    Position::new(p.line, p.character)
}

pub(crate) fn to_core_position(p: Position) -> text::Position {
    text::Position::new(p.line, p.character)
}

/// Protocol range of a byte span.
pub fn lsp_range(document: &Document, span: Span) -> Range {
    let range = document.range(span);
    Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

/// Byte offset of a protocol position, clamped to the buffer.
pub fn offset_at(document: &Document, position: Position) -> usize {
    document.offset_at(to_core_position(position))
}

pub(crate) fn span_of(document: &Document, range: Range) -> Span {
    document.span_of(text::Range::new(
        to_core_position(range.start),
        to_core_position(range.end),
    ))
}

pub fn to_lsp_diagnostic(d: &diag::Diagnostic) -> Diagnostic {
    let severity = match d.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    };
    let mut tags = Vec::new();
    if d.code.is_deprecation() {
        tags.push(DiagnosticTag::DEPRECATED);
    }
    if d.code.is_unnecessary() {
        tags.push(DiagnosticTag::UNNECESSARY);
    }
    Diagnostic {
        range: Range::new(to_lsp_position(d.range.start), to_lsp_position(d.range.end)),
        severity: Some(severity),
        code: Some(NumberOrString::String(d.code.as_str().to_string())),
        source: Some(SOURCE.to_string()),
        message: d.message.clone(),
        tags: (!tags.is_empty()).then_some(tags),
        ..Default::default()
    }
}

/// Raw extent of an instruction including trailing blanks of its argument region.
pub(crate) fn instruction_extent(inst: &Instruction) -> Span {
    let end = inst.span.end.max(inst.region.full_span().end);
    Span::new(inst.keyword_span.start, end)
}

/// The instruction whose extent contains `offset`, with its index.
pub(crate) fn instruction_around(file: &Dockerfile, offset: usize) -> Option<(usize, &Instruction)> {
    file.instructions
        .iter()
        .enumerate()
        .find(|(_, inst)| instruction_extent(inst).contains(offset))
}

pub(crate) fn markdown(value: impl Into<String>) -> MarkupContent {
    MarkupContent {
        kind: MarkupKind::Markdown,
        value: value.into(),
    }
}
