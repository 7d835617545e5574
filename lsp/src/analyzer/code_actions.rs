use std::collections::HashMap;

use dockerls_core::diag::DiagnosticCode;
use dockerls_core::text::Span;
use dockerls_core::Analysis;
use serde_json::Value;
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Command, Diagnostic, NumberOrString, Range,
    TextEdit, Url, WorkspaceEdit,
};

use super::utils::{lsp_range, span_of, SOURCE};
use super::DockerAnalyzer;

pub const UPPERCASE_INSTRUCTION: &str = "dockerls.fix.uppercaseInstruction";
pub const LOWERCASE_DIRECTIVE: &str = "dockerls.fix.lowercaseDirective";
pub const ESCAPE_DIRECTIVE: &str = "dockerls.fix.escapeDirective";
pub const CONVERT_TO_AS: &str = "dockerls.fix.convertToAs";
pub const MAINTAINER_TO_LABEL: &str = "dockerls.fix.maintainerToLabel";
pub const REMOVE_EMPTY_LINE: &str = "dockerls.fix.removeEmptyContinuationLine";
pub const REMOVE_ARGUMENT: &str = "dockerls.fix.removeArgument";
pub const REMOVE_FLAG: &str = "dockerls.fix.removeFlag";
pub const DOUBLE_QUOTES: &str = "dockerls.fix.convertToDoubleQuotes";

/// Commands advertised through `executeCommandProvider`.
pub const COMMANDS: [&str; 9] = [
    UPPERCASE_INSTRUCTION,
    LOWERCASE_DIRECTIVE,
    ESCAPE_DIRECTIVE,
    CONVERT_TO_AS,
    MAINTAINER_TO_LABEL,
    REMOVE_EMPTY_LINE,
    REMOVE_ARGUMENT,
    REMOVE_FLAG,
    DOUBLE_QUOTES,
];

/// Arguments every fix command carries: the document, the diagnostic range and an
/// optional discriminator (the escape character to use).
#[derive(Debug, Clone, PartialEq)]
pub struct FixTarget {
    pub uri: Url,
    pub range: Range,
    pub value: Option<String>,
}

impl FixTarget {
    pub fn from_arguments(arguments: &[Value]) -> Option<FixTarget> {
        let uri = serde_json::from_value(arguments.first()?.clone()).ok()?;
        let range = serde_json::from_value(arguments.get(1)?.clone()).ok()?;
        let value = arguments.get(2).and_then(Value::as_str).map(str::to_string);
        Some(FixTarget { uri, range, value })
    }

    fn to_arguments(&self) -> Vec<Value> {
        let mut args = vec![
            Value::String(self.uri.to_string()),
            serde_json::to_value(self.range).unwrap_or(Value::Null),
        ];
        if let Some(value) = &self.value {
            args.push(Value::String(value.clone()));
        }
        args
    }
}

impl DockerAnalyzer {
    /// Quick fixes for the engine diagnostics in `diagnostics`.
    pub fn code_actions(&self, uri: &Url, diagnostics: &[Diagnostic]) -> Vec<CodeActionOrCommand> {
        let mut actions = Vec::new();
        for diagnostic in diagnostics {
            if diagnostic.source.as_deref() != Some(SOURCE) {
                continue;
            }
            let Some(NumberOrString::String(code)) = &diagnostic.code else {
                continue;
            };
            let Ok(code) = code.parse::<DiagnosticCode>() else {
                continue;
            };
            let target = |value: Option<&str>| FixTarget {
                uri: uri.clone(),
                range: diagnostic.range,
                value: value.map(str::to_string),
            };
            let fixes: Vec<(&str, &str, Option<&str>)> = match code {
                DiagnosticCode::CasingInstruction => {
                    vec![("Convert instruction to uppercase", UPPERCASE_INSTRUCTION, None)]
                }
                DiagnosticCode::CasingDirective => {
                    vec![("Convert directive to lowercase", LOWERCASE_DIRECTIVE, None)]
                }
                DiagnosticCode::InvalidEscapeDirective => vec![
                    ("Set escape character to \\", ESCAPE_DIRECTIVE, Some("\\")),
                    ("Set escape character to `", ESCAPE_DIRECTIVE, Some("`")),
                ],
                DiagnosticCode::InvalidAs => vec![("Convert to AS", CONVERT_TO_AS, None)],
                DiagnosticCode::DeprecatedMaintainer => {
                    vec![("Convert MAINTAINER to a LABEL", MAINTAINER_TO_LABEL, None)]
                }
                DiagnosticCode::EmptyContinuationLine => {
                    vec![("Remove empty continuation line", REMOVE_EMPTY_LINE, None)]
                }
                DiagnosticCode::ArgumentUnnecessary => {
                    vec![("Remove unnecessary argument", REMOVE_ARGUMENT, None)]
                }
                DiagnosticCode::ArgumentRequiresOne | DiagnosticCode::ArgumentExtra => {
                    vec![("Remove extra argument", REMOVE_ARGUMENT, None)]
                }
                DiagnosticCode::FlagDuplicate => vec![("Remove duplicate flag", REMOVE_FLAG, None)],
                DiagnosticCode::JsonInSingleQuotes => {
                    vec![("Convert to double quotes", DOUBLE_QUOTES, None)]
                }
                _ => Vec::new(),
            };
            for (title, command, value) in fixes {
                actions.push(CodeActionOrCommand::CodeAction(CodeAction {
                    title: title.to_string(),
                    kind: Some(CodeActionKind::QUICKFIX),
                    diagnostics: Some(vec![diagnostic.clone()]),
                    command: Some(Command {
                        title: title.to_string(),
                        command: command.to_string(),
                        arguments: Some(target(value).to_arguments()),
                    }),
                    ..Default::default()
                }));
            }
        }
        actions
    }
}

/// The workspace edit a fix command performs against the current model.
pub fn command_edit(model: &Analysis, command: &str, target: &FixTarget) -> Option<WorkspaceEdit> {
    let document = &model.document;
    let span = span_of(document, target.range);
    let text = document.slice(span);
    let edit = match command {
        UPPERCASE_INSTRUCTION => replace(model, span, text.to_ascii_uppercase()),
        LOWERCASE_DIRECTIVE => replace(model, span, text.to_ascii_lowercase()),
        ESCAPE_DIRECTIVE => {
            let value = target.value.as_deref()?;
            if value != "\\" && value != "`" {
                return None;
            }
            replace(model, span, value.to_string())
        }
        CONVERT_TO_AS => replace(model, span, "AS".to_string()),
        MAINTAINER_TO_LABEL => {
            let inst = model
                .dockerfile
                .instructions
                .iter()
                .find(|i| i.keyword_span == span)?;
            let value = inst.region.as_str().trim();
            let quoted = if value.starts_with('"') && value.ends_with('"') && value.len() > 1 {
                value.to_string()
            } else {
                format!("\"{}\"", value.replace('"', "\\\""))
            };
            replace(model, inst.span, format!("LABEL maintainer={}", quoted))
        }
        REMOVE_EMPTY_LINE => {
            let line = document.line_of(span.start);
            let whole = Span::new(document.line_start(line), document.line_start(line + 1));
            replace(model, whole, String::new())
        }
        REMOVE_ARGUMENT => replace(model, with_leading_blanks(model, span), String::new()),
        REMOVE_FLAG => {
            let flag = model
                .dockerfile
                .instructions
                .iter()
                .flat_map(|i| i.flags())
                .find(|f| f.name_span == span)?;
            replace(model, with_leading_blanks(model, flag.span), String::new())
        }
        DOUBLE_QUOTES => replace(model, span, to_double_quotes(text)),
        _ => return None,
    };
    let mut changes = HashMap::new();
    changes.insert(target.uri.clone(), vec![edit]);
    Some(WorkspaceEdit {
        changes: Some(changes),
        ..Default::default()
    })
}

fn replace(model: &Analysis, span: Span, new_text: String) -> TextEdit {
    TextEdit::new(lsp_range(&model.document, span), new_text)
}

fn with_leading_blanks(model: &Analysis, span: Span) -> Span {
    let before = &model.document.text()[..span.start];
    let blanks = before.len() - before.trim_end_matches([' ', '\t']).len();
    Span::new(span.start - blanks, span.end)
}

/// Rewrites a single-quoted JSON array with double quotes, escaping embedded `"`.
fn to_double_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut inside = false;
    for ch in text.chars() {
        match ch {
            '\'' => {
                inside = !inside;
                out.push('"');
            }
            '"' if inside => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}
