use std::sync::Arc;

use dockerls_core::diag::ValidatorSettings;
use dockerls_core::{analyze, Analysis};
use tower_lsp::lsp_types::*;

mod code_actions;
mod completions;
mod docs;
mod folding;
mod formatting;
mod hover;
mod links;
mod references;
mod semantic_tokens;
mod symbols;
mod utils;

pub use code_actions::{command_edit, FixTarget, COMMANDS};
pub use completions::{CompletionPlan, ImageQuery};
pub use formatting::{format_document, format_on_type, format_range, FormatterSettings};
pub use semantic_tokens::{TOKEN_MODIFIERS, TOKEN_TYPES};
pub use utils::{lsp_range, offset_at, to_lsp_diagnostic};

/// Result of analyzing a Dockerfile: protocol diagnostics and symbols plus the engine model
/// the other projections read from.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: Vec<DocumentSymbol>,
    pub model: Arc<Analysis>,
}

/// Dockerfile analyzer providing LSP functionality.
#[derive(Debug, Clone, Default)]
pub struct DockerAnalyzer {
    settings: ValidatorSettings,
}

impl DockerAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ValidatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    pub fn analyze(&self, content: &str) -> AnalysisResult {
        let model = Arc::new(analyze(content, &self.settings));
        let diagnostics = model
            .diagnostics
            .iter()
            .map(to_lsp_diagnostic)
            .collect();
        let symbols = self.document_symbols(&model);
        AnalysisResult {
            diagnostics,
            symbols,
            model,
        }
    }
}
