use dockerls_core::check::FlagSpec;
use dockerls_core::scope::Scope;
use dockerls_core::text::Span;
use dockerls_core::token::{Instruction, Keyword, KNOWN_DIRECTIVES};
use dockerls_core::Analysis;
use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, Position, Range,
    TextEdit,
};

use super::docs::{directive_doc, flag_doc, keyword_doc, PREDEFINED_ARGS};
use super::utils::{instruction_around, lsp_range, markdown, offset_at};
use super::DockerAnalyzer;

static DIRECTIVE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*#[ \t]*([a-zA-Z]*)$").expect("directive prefix pattern is valid"));

static VARIABLE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\{?)([a-zA-Z0-9_]*)$").expect("variable prefix pattern is valid"));

/// Tag lookup the transport has to perform before completion can finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub repository: String,
    pub prefix: String,
    /// Range the chosen tag replaces.
    pub range: Range,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionPlan {
    pub items: Vec<CompletionItem>,
    pub image_query: Option<ImageQuery>,
}

impl ImageQuery {
    /// The typed tag prefix, `None` right after the colon.
    pub fn prefix(&self) -> Option<&str> {
        Some(self.prefix.as_str()).filter(|p| !p.is_empty())
    }

    /// Completion items for the tags a registry returned for this query.
    pub fn items(&self, tags: &[String]) -> Vec<CompletionItem> {
        tags.iter()
            .enumerate()
            .map(|(i, tag)| CompletionItem {
                label: tag.clone(),
                kind: Some(CompletionItemKind::VALUE),
                detail: Some(format!("{}:{}", self.repository, tag)),
                sort_text: Some(format!("{:04}", i)),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(self.range, tag.clone()))),
                ..Default::default()
            })
            .collect()
    }
}

impl DockerAnalyzer {
    /// Completion candidates at `position`, plus an image tag query when the cursor sits
    /// after `FROM image:`.
    pub fn completion_plan(&self, model: &Analysis, position: Position) -> CompletionPlan {
        let document = &model.document;
        let offset = offset_at(document, position);
        let line = document.line_of(offset);
        let before = &document.text()[document.line_start(line)..offset];

        if let Some(items) = self.directive_completions(model, line, offset, before) {
            return CompletionPlan {
                items,
                image_query: None,
            };
        }

        let Some((index, inst)) = instruction_around(&model.dockerfile, offset) else {
            let word = before.trim_start_matches([' ', '\t']);
            if word.chars().all(|c| c.is_ascii_alphabetic()) {
                let start = offset - word.len();
                return CompletionPlan {
                    items: keyword_items(model, Span::new(start, offset), true),
                    image_query: None,
                };
            }
            return CompletionPlan::default();
        };

        if offset <= inst.keyword_span.end {
            let span = Span::new(inst.keyword_span.start, offset);
            return CompletionPlan {
                items: keyword_items(model, span, false),
                image_query: None,
            };
        }

        if let Some(caps) = VARIABLE_PREFIX_RE.captures(before) {
            let braced = !caps[1].is_empty();
            let name = &caps[2];
            let span = Span::new(offset - name.len(), offset);
            let closes = document.text()[offset..].starts_with('}');
            return CompletionPlan {
                items: variable_items(model, offset, span, braced && !closes),
                image_query: None,
            };
        }

        let argument = inst.arguments.iter().enumerate().find(|(_, arg)| {
            let span = arg.span();
            span.start <= offset && offset <= span.end
        });
        let prefix = argument.map_or("", |(_, arg)| arg.prefix_at(offset));
        let prefix_span = Span::new(offset - prefix.len(), offset);

        let leading_flags = inst
            .arguments
            .iter()
            .take_while(|arg| arg.text().starts_with("--"))
            .count();
        let in_flag_zone = inst.kind.is_flag_bearing()
            && argument.map_or(true, |(i, _)| i <= leading_flags)
            && prefix.starts_with('-');
        if in_flag_zone {
            return CompletionPlan {
                items: flag_items(model, index, inst, prefix, prefix_span),
                image_query: None,
            };
        }

        let positional = inst.positional();
        let position_index = positional
            .iter()
            .position(|arg| arg.span().start <= offset && offset <= arg.span().end)
            .unwrap_or_else(|| positional.iter().filter(|arg| arg.span().end < offset).count());

        let mut plan = CompletionPlan::default();
        match inst.kind {
            Keyword::From => match position_index {
                0 => {
                    if let Some(colon) = prefix.rfind(':') {
                        let repository = &prefix[..colon];
                        let tag = &prefix[colon + 1..];
                        if !repository.is_empty() && !repository.contains('$') {
                            plan.image_query = Some(ImageQuery {
                                repository: repository.to_string(),
                                prefix: tag.to_string(),
                                range: lsp_range(document, Span::new(offset - tag.len(), offset)),
                            });
                        }
                    } else {
                        let current = model.scopes.stages.iter().position(|s| s.instruction == index);
                        plan.items = stage_items(model, current, prefix, prefix_span);
                    }
                }
                1 => plan.items = word_items(model, &["AS"], prefix_span),
                _ => {}
            },
            Keyword::Healthcheck if position_index == 0 => {
                plan.items = word_items(model, &["CMD", "NONE"], prefix_span);
            }
            Keyword::Onbuild if position_index == 0 => {
                plan.items = trigger_items(prefix_span, model);
            }
            _ => {}
        }
        plan
    }

    fn directive_completions(
        &self,
        model: &Analysis,
        line: usize,
        offset: usize,
        before: &str,
    ) -> Option<Vec<CompletionItem>> {
        let document = &model.document;
        let earlier_lines_are_directives = model
            .dockerfile
            .directives
            .iter()
            .take(line)
            .enumerate()
            .all(|(i, d)| document.line_of(d.span.start) == i);
        if model.dockerfile.directives.len() < line || !earlier_lines_are_directives {
            return None;
        }
        let caps = DIRECTIVE_PREFIX_RE.captures(before)?;
        let typed = caps.get(1).map_or("", |m| m.as_str());
        let span = Span::new(offset - typed.len(), offset);
        let range = lsp_range(document, span);
        let items = KNOWN_DIRECTIVES
            .iter()
            .filter(|name| name.starts_with(&typed.to_ascii_lowercase()))
            .map(|name| CompletionItem {
                label: name.to_string(),
                kind: Some(CompletionItemKind::PROPERTY),
                detail: Some("parser directive".to_string()),
                documentation: directive_doc(name).map(|d| Documentation::MarkupContent(markdown(d))),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, format!("{}=", name)))),
                ..Default::default()
            })
            .collect();
        Some(items)
    }
}

fn keyword_items(model: &Analysis, span: Span, fresh_line: bool) -> Vec<CompletionItem> {
    let document = &model.document;
    let before_first_from = model
        .dockerfile
        .first_from()
        .map_or(true, |from| from.keyword_span.start >= span.start);
    let typed = document.slice(span).to_ascii_uppercase();
    let range = lsp_range(document, span);
    Keyword::ALL
        .iter()
        .filter(|kw| !before_first_from || matches!(kw, Keyword::From | Keyword::Arg))
        .filter(|kw| kw.as_str().starts_with(&typed))
        .map(|kw| keyword_item(*kw, range, fresh_line))
        .collect()
}

fn keyword_item(kind: Keyword, range: Range, with_space: bool) -> CompletionItem {
    let new_text = if with_space {
        format!("{} ", kind.as_str())
    } else {
        kind.as_str().to_string()
    };
    CompletionItem {
        label: kind.as_str().to_string(),
        kind: Some(CompletionItemKind::KEYWORD),
        documentation: keyword_doc(kind).map(|d| Documentation::MarkupContent(markdown(d))),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, new_text))),
        ..Default::default()
    }
}

fn trigger_items(span: Span, model: &Analysis) -> Vec<CompletionItem> {
    let document = &model.document;
    let typed = document.slice(span).to_ascii_uppercase();
    let range = lsp_range(document, span);
    Keyword::ALL
        .iter()
        .filter(|kw| !matches!(kw, Keyword::From | Keyword::Maintainer | Keyword::Onbuild))
        .filter(|kw| kw.as_str().starts_with(&typed))
        .map(|kw| keyword_item(*kw, range, true))
        .collect()
}

fn flag_items(
    model: &Analysis,
    index: usize,
    inst: &Instruction,
    prefix: &str,
    span: Span,
) -> Vec<CompletionItem> {
    let document = &model.document;
    if inst.kind == Keyword::Copy {
        if let Some(value) = prefix.strip_prefix("--from=") {
            let current = match model.scopes.scope_of(index) {
                Scope::Stage(stage) => Some(stage),
                Scope::Global => None,
            };
            let value_span = Span::new(span.end - value.len(), span.end);
            return stage_items(model, current, value, value_span);
        }
    }
    if prefix.contains('=') {
        return Vec::new();
    }

    let spec = FlagSpec::for_keyword(inst.kind);
    let present: Vec<String> = inst
        .flags()
        .into_iter()
        .filter(|flag| !flag.span.contains(span.end))
        .map(|flag| flag.name)
        .collect();
    let range = lsp_range(document, span);
    spec.names()
        .filter(|name| !present.iter().any(|p| p == name))
        .map(|name| {
            let label = format!("--{}", name);
            let new_text = if spec.is_boolean(name) {
                label.clone()
            } else {
                format!("{}=", label)
            };
            CompletionItem {
                label: label.clone(),
                kind: Some(CompletionItemKind::FIELD),
                documentation: flag_doc(inst.kind, name)
                    .map(|d| Documentation::MarkupContent(markdown(d))),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, new_text))),
                ..Default::default()
            }
        })
        .filter(|item| item.label.starts_with(prefix))
        .collect()
}

/// Names of stages other than `current`.
fn stage_items(model: &Analysis, current: Option<usize>, prefix: &str, span: Span) -> Vec<CompletionItem> {
    let range = lsp_range(&model.document, span);
    model
        .scopes
        .stages
        .iter()
        .filter(|stage| Some(stage.index) != current)
        .filter_map(|stage| stage.name.as_deref().map(|name| (stage, name)))
        .filter(|(_, name)| name.starts_with(prefix))
        .map(|(stage, name)| CompletionItem {
            label: name.to_string(),
            kind: Some(CompletionItemKind::REFERENCE),
            detail: Some(format!("stage {} ({})", stage.index, stage.from_image)),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, name.to_string()))),
            ..Default::default()
        })
        .collect()
}

fn variable_items(model: &Analysis, offset: usize, span: Span, close_brace: bool) -> Vec<CompletionItem> {
    let document = &model.document;
    let typed = document.slice(span);
    let range = lsp_range(document, span);
    let finish = |name: &str| {
        if close_brace {
            format!("{}}}", name)
        } else {
            name.to_string()
        }
    };

    let visible = model.scopes.visible_at(offset);
    let mut items: Vec<CompletionItem> = visible
        .iter()
        .filter(|binding| binding.name.starts_with(typed))
        .map(|binding| CompletionItem {
            label: binding.name.clone(),
            kind: Some(CompletionItemKind::VARIABLE),
            detail: binding.value.clone(),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, finish(&binding.name)))),
            ..Default::default()
        })
        .collect();
    for name in PREDEFINED_ARGS {
        if !name.starts_with(typed) || visible.iter().any(|b| b.name == name) {
            continue;
        }
        items.push(CompletionItem {
            label: name.to_string(),
            kind: Some(CompletionItemKind::CONSTANT),
            detail: Some("predefined build argument".to_string()),
            sort_text: Some(format!("~{}", name)),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, finish(name)))),
            ..Default::default()
        });
    }
    items
}

fn word_items(model: &Analysis, words: &[&str], span: Span) -> Vec<CompletionItem> {
    let typed = model.document.slice(span).to_ascii_uppercase();
    let range = lsp_range(&model.document, span);
    words
        .iter()
        .filter(|word| word.starts_with(&typed))
        .map(|word| CompletionItem {
            label: word.to_string(),
            kind: Some(CompletionItemKind::KEYWORD),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(range, format!("{} ", word)))),
            ..Default::default()
        })
        .collect()
}
