//! Dockerfile analysis engine: tokenization, validation and scope tracking.

pub mod check;
pub mod diag;
pub mod scope;
pub mod text;
pub mod token;

use tracing::debug;

use diag::{Diagnostic, ValidatorSettings};
use scope::ScopeTable;
use text::Document;
use token::Dockerfile;

/// Everything one validation pass produces for a buffer.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub document: Document,
    pub dockerfile: Dockerfile,
    pub scopes: ScopeTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenizes, scopes and validates `text`. Never fails: problems become diagnostics.
pub fn analyze(text: &str, settings: &ValidatorSettings) -> Analysis {
    let document = Document::new(text);
    let dockerfile = Dockerfile::parse(&document);
    let scopes = ScopeTable::build(&dockerfile);
    let diagnostics = check::validate(&dockerfile, &document, &scopes, settings);
    debug!(
        bytes = text.len(),
        instructions = dockerfile.instructions.len(),
        diagnostics = diagnostics.len(),
        "validation pass"
    );
    Analysis {
        document,
        dockerfile,
        scopes,
        diagnostics,
    }
}

/// Diagnostics only, with default settings.
pub fn validate(text: &str) -> Vec<Diagnostic> {
    analyze(text, &ValidatorSettings::default()).diagnostics
}
