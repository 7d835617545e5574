//! Diagnostic taxonomy and emission.

mod code;
pub mod messages;
mod settings;

#[cfg(test)]
mod diag_test;

pub use code::{DiagnosticCode, UnknownCode};
pub use settings::{SeverityLevel, ValidatorSettings};

use std::fmt;

use crate::text::{Document, Range, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Information => "information",
            Severity::Hint => "hint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub range: Range,
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} [{}]",
            self.range.start,
            self.severity.as_str(),
            self.message,
            self.code
        )
    }
}

/// Collects diagnostics for one validation pass.
///
/// Spans are clamped to the document and empty spans widened before conversion.
pub struct Emitter<'a> {
    document: &'a Document,
    settings: &'a ValidatorSettings,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Emitter<'a> {
    pub fn new(document: &'a Document, settings: &'a ValidatorSettings) -> Self {
        Self {
            document,
            settings,
            diagnostics: Vec::new(),
        }
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn settings(&self) -> &'a ValidatorSettings {
        self.settings
    }

    /// Emits a fixed-severity finding.
    pub fn push(&mut self, code: DiagnosticCode, span: Span, message: String) {
        let severity = match code {
            DiagnosticCode::UnknownDirective => Severity::Warning,
            _ => Severity::Error,
        };
        self.emit(severity, code, span, message);
    }

    /// Emits a configurable finding; `Ignore` drops it.
    pub fn push_configured(
        &mut self,
        level: SeverityLevel,
        code: DiagnosticCode,
        span: Span,
        message: String,
    ) {
        let severity = match level {
            SeverityLevel::Ignore => return,
            SeverityLevel::Warning => Severity::Warning,
            SeverityLevel::Error => Severity::Error,
        };
        self.emit(severity, code, span, message);
    }

    fn emit(&mut self, severity: Severity, code: DiagnosticCode, span: Span, message: String) {
        let len = self.document.len();
        let span = self
            .document
            .widen(Span::new(span.start.min(len), span.end.min(len).max(span.start.min(len))));
        self.diagnostics.push(Diagnostic {
            span,
            range: self.document.range(span),
            severity,
            code,
            message,
        });
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics ordered by position.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics
            .sort_by_key(|d| (d.span.start, d.span.end));
        self.diagnostics
    }
}
