use dockerls_core::scope::{BuildStage, VariableBinding};
use dockerls_core::text::Span;
use dockerls_core::Analysis;
use tower_lsp::lsp_types::{Hover, HoverContents, Position};

use super::docs::{directive_doc, flag_doc, keyword_doc};
use super::utils::{instruction_around, lsp_range, markdown, offset_at};
use super::DockerAnalyzer;

impl DockerAnalyzer {
    pub fn hover(&self, model: &Analysis, position: Position) -> Option<Hover> {
        let offset = offset_at(&model.document, position);
        let (text, span) = self.hover_text(model, offset)?;
        Some(Hover {
            contents: HoverContents::Markup(markdown(text)),
            range: Some(lsp_range(&model.document, span)),
        })
    }

    fn hover_text(&self, model: &Analysis, offset: usize) -> Option<(String, Span)> {
        let file = &model.dockerfile;
        let scopes = &model.scopes;

        if let Some(directive) = file.directives.iter().find(|d| d.name_span.contains(offset)) {
            return directive_doc(&directive.name).map(|doc| (doc.to_string(), directive.name_span));
        }

        if let Some(reference) = scopes.reference_at(offset) {
            let binding = reference.binding.map(|b| &scopes.bindings[b])?;
            let value = scopes.effective_value(reference);
            return Some((variable_text(binding, value.as_deref()), reference.span));
        }
        if let Some((_, binding)) = scopes.binding_at(offset) {
            return Some((variable_text(binding, binding.value.as_deref()), binding.name_span));
        }

        if let Some(stage) = scopes
            .stages
            .iter()
            .find(|s| s.name_span.is_some_and(|span| span.contains(offset)))
        {
            return stage.name_span.map(|span| (stage_text(stage), span));
        }
        if let Some(reference) = scopes.stage_references.iter().find(|r| r.span.contains(offset)) {
            let stage = reference.stage.and_then(|s| scopes.stage(s))?;
            return Some((stage_text(stage), reference.span));
        }

        let (_, inst) = instruction_around(file, offset)?;
        if inst.keyword_span.contains(offset) {
            return keyword_doc(inst.kind).map(|doc| (doc.to_string(), inst.keyword_span));
        }
        if let Some(trigger) = inst.onbuild_trigger() {
            if trigger.keyword_span.contains(offset) {
                return keyword_doc(trigger.kind).map(|doc| (doc.to_string(), trigger.keyword_span));
            }
        }
        let flag = inst
            .flags()
            .into_iter()
            .find(|f| Span::new(f.span.start, f.name_span.end).contains(offset))?;
        let doc = flag_doc(inst.kind, &flag.name)?;
        Some((format!("`--{}`\n\n{}", flag.name, doc), flag.name_span))
    }
}

fn variable_text(binding: &VariableBinding, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("```\n{}={}\n```", binding.name, value),
        None => format!("```\n{}\n```", binding.name),
    }
}

fn stage_text(stage: &BuildStage) -> String {
    match &stage.name {
        Some(name) => format!("Build stage `{}` (#{})\n\nBase image: `{}`", name, stage.index, stage.from_image),
        None => format!("Build stage #{}\n\nBase image: `{}`", stage.index, stage.from_image),
    }
}
