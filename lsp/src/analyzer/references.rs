use std::collections::HashMap;

use dockerls_core::check::is_valid_stage_name;
use dockerls_core::scope::Symbol;
use dockerls_core::Analysis;
use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{
    DocumentHighlight, DocumentHighlightKind, Location, Position, PrepareRenameResponse, TextEdit,
    Url, WorkspaceEdit,
};

use super::utils::{lsp_range, offset_at};
use super::DockerAnalyzer;

static VARIABLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("variable name pattern is valid"));

impl DockerAnalyzer {
    pub fn definition(&self, model: &Analysis, uri: &Url, position: Position) -> Option<Location> {
        let offset = offset_at(&model.document, position);
        let span = model.scopes.definition_at(offset)?;
        Some(Location::new(uri.clone(), lsp_range(&model.document, span)))
    }

    pub fn references(
        &self,
        model: &Analysis,
        uri: &Url,
        position: Position,
        include_declaration: bool,
    ) -> Vec<Location> {
        let offset = offset_at(&model.document, position);
        let Some((symbol, _)) = model.scopes.symbol_at(offset) else {
            return Vec::new();
        };
        model
            .scopes
            .occurrences(&symbol)
            .into_iter()
            .filter(|o| include_declaration || !o.declaration)
            .map(|o| Location::new(uri.clone(), lsp_range(&model.document, o.span)))
            .collect()
    }

    pub fn document_highlights(&self, model: &Analysis, position: Position) -> Vec<DocumentHighlight> {
        let offset = offset_at(&model.document, position);
        let Some((symbol, _)) = model.scopes.symbol_at(offset) else {
            return Vec::new();
        };
        model
            .scopes
            .occurrences(&symbol)
            .into_iter()
            .map(|o| DocumentHighlight {
                range: lsp_range(&model.document, o.span),
                kind: Some(if o.declaration {
                    DocumentHighlightKind::WRITE
                } else {
                    DocumentHighlightKind::READ
                }),
            })
            .collect()
    }

    pub fn prepare_rename(&self, model: &Analysis, position: Position) -> Option<PrepareRenameResponse> {
        let offset = offset_at(&model.document, position);
        let (_, span) = model.scopes.symbol_at(offset)?;
        Some(PrepareRenameResponse::RangeWithPlaceholder {
            range: lsp_range(&model.document, span),
            placeholder: model.document.slice(span).to_string(),
        })
    }

    /// Renames the variable or stage under `position`. `None` when nothing renameable is
    /// there or `new_name` is not a valid name for it.
    pub fn rename(
        &self,
        model: &Analysis,
        uri: &Url,
        position: Position,
        new_name: &str,
    ) -> Option<WorkspaceEdit> {
        let offset = offset_at(&model.document, position);
        let (symbol, _) = model.scopes.symbol_at(offset)?;
        let valid = match symbol {
            Symbol::Variable { .. } => VARIABLE_NAME_RE.is_match(new_name),
            Symbol::Stage(_) => is_valid_stage_name(new_name),
        };
        if !valid {
            return None;
        }
        let edits: Vec<TextEdit> = model
            .scopes
            .occurrences(&symbol)
            .into_iter()
            .map(|o| TextEdit::new(lsp_range(&model.document, o.span), new_name.to_string()))
            .collect();
        let mut changes = HashMap::new();
        changes.insert(uri.clone(), edits);
        Some(WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        })
    }
}
