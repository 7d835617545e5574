use dockerls_core::token::{Instruction, Keyword};
use dockerls_core::Analysis;
use tower_lsp::lsp_types::{DocumentSymbol, SymbolKind};

use super::utils::lsp_range;
use super::DockerAnalyzer;

const DETAIL_LIMIT: usize = 60;

impl DockerAnalyzer {
    /// Stages as namespaces holding their instructions; anything before the first `FROM`
    /// stays at the top level.
    pub fn document_symbols(&self, model: &Analysis) -> Vec<DocumentSymbol> {
        let file = &model.dockerfile;
        let mut out = Vec::new();
        let mut stages = model.scopes.stages.iter().peekable();
        let mut current: Option<DocumentSymbol> = None;

        for (idx, inst) in file.instructions.iter().enumerate() {
            if let Some(stage) = stages.next_if(|s| s.instruction == idx) {
                if let Some(done) = current.take() {
                    out.push(done);
                }
                let name = stage.name.clone().unwrap_or_else(|| stage.from_image.clone());
                let selection = stage.name_span.unwrap_or(inst.keyword_span);
                #[allow(deprecated)]
                let symbol = DocumentSymbol {
                    name: if name.is_empty() { "FROM".to_string() } else { name },
                    detail: Some(detail_of(inst)),
                    kind: SymbolKind::NAMESPACE,
                    tags: None,
                    deprecated: None,
                    range: lsp_range(&model.document, stage.span),
                    selection_range: lsp_range(&model.document, selection),
                    children: Some(Vec::new()),
                };
                current = Some(symbol);
                continue;
            }
            let symbol = instruction_symbol(model, inst);
            match current.as_mut().and_then(|s| s.children.as_mut()) {
                Some(children) => children.push(symbol),
                None => out.push(symbol),
            }
        }
        if let Some(done) = current {
            out.push(done);
        }
        out
    }
}

fn instruction_symbol(model: &Analysis, inst: &Instruction) -> DocumentSymbol {
    let kind = match inst.kind {
        Keyword::Arg | Keyword::Env => SymbolKind::VARIABLE,
        Keyword::Label => SymbolKind::PROPERTY,
        _ => SymbolKind::FUNCTION,
    };
    let name = match inst.kind {
        Keyword::Unknown => inst.keyword.clone(),
        known => known.as_str().to_string(),
    };
    #[allow(deprecated)]
    DocumentSymbol {
        name,
        detail: Some(detail_of(inst)),
        kind,
        tags: None,
        deprecated: None,
        range: lsp_range(&model.document, inst.span),
        selection_range: lsp_range(&model.document, inst.keyword_span),
        children: None,
    }
}

fn detail_of(inst: &Instruction) -> String {
    let text = inst.region.as_str().trim();
    match text.char_indices().nth(DETAIL_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
