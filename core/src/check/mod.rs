//! Per-instruction grammar validation.
//!
//! Validators are free functions over one instruction that push into a shared
//! [`Emitter`]. Cross-instruction checks (source image, duplicate stage names, repeated
//! `CMD`-like instructions) run after the per-instruction pass.

mod flags;
mod from;
mod healthcheck;
mod json_form;
mod onbuild;
mod ports;
mod properties;


pub use flags::FlagSpec;
pub use from::is_valid_stage_name;
pub use healthcheck::{DURATION_FLAGS, DurationError, parse_duration};
pub use ports::{is_valid_port, is_valid_protocol};

use std::collections::HashMap;

use crate::diag::{Diagnostic, DiagnosticCode, Emitter, SeverityLevel, ValidatorSettings, messages};
use crate::scope::ScopeTable;
use crate::text::{Document, Span};
use crate::token::{Dockerfile, Instruction, Keyword};

pub fn validate(
    file: &Dockerfile,
    document: &Document,
    scopes: &ScopeTable,
    settings: &ValidatorSettings,
) -> Vec<Diagnostic> {
    let mut out = Emitter::new(document, settings);
    check_directives(file, &mut out);
    check_source_image(file, &mut out);
    for inst in &file.instructions {
        check_instruction(inst, &mut out);
        for line in &inst.empty_continuation_lines {
            out.push_configured(
                settings.empty_continuation_line,
                DiagnosticCode::EmptyContinuationLine,
                *line,
                messages::empty_continuation_line(),
            );
        }
    }
    check_duplicate_stages(scopes, &mut out);
    check_multiple_instructions(file, scopes, &mut out);
    out.finish()
}

fn check_directives(file: &Dockerfile, out: &mut Emitter<'_>) {
    for directive in &file.directives {
        if directive.name != directive.name.to_ascii_lowercase() {
            let level = out.settings().directive_casing;
            out.push_configured(
                level,
                DiagnosticCode::CasingDirective,
                directive.name_span,
                messages::directive_casing(),
            );
        }
        if !directive.is_known() {
            out.push(
                DiagnosticCode::UnknownDirective,
                directive.name_span,
                messages::unknown_directive(&directive.name),
            );
        } else if directive.is_escape() && directive.escape_char().is_none() {
            out.push(
                DiagnosticCode::InvalidEscapeDirective,
                directive.value_span,
                messages::invalid_escape(&directive.value),
            );
        }
    }
}

fn check_source_image(file: &Dockerfile, out: &mut Emitter<'_>) {
    match file.instructions.iter().find(|i| i.kind != Keyword::Arg) {
        Some(inst) if inst.kind == Keyword::From => {}
        Some(inst) => out.push(
            DiagnosticCode::NoSourceImage,
            inst.keyword_span,
            messages::no_source_image(),
        ),
        None => out.push(
            DiagnosticCode::NoSourceImage,
            Span::empty(0),
            messages::no_source_image(),
        ),
    }
}

pub(crate) fn check_instruction(inst: &Instruction, out: &mut Emitter<'_>) {
    if inst.kind == Keyword::Unknown {
        out.push(
            DiagnosticCode::UnknownInstruction,
            inst.keyword_span,
            messages::unknown_instruction(&inst.keyword),
        );
        return;
    }
    if inst.keyword != inst.keyword.to_ascii_uppercase() {
        let level = out.settings().instruction_casing;
        out.push_configured(
            level,
            DiagnosticCode::CasingInstruction,
            inst.keyword_span,
            messages::instruction_casing(),
        );
    }
    if inst.kind == Keyword::Maintainer {
        let level = out.settings().deprecated_maintainer;
        out.push_configured(
            level,
            DiagnosticCode::DeprecatedMaintainer,
            inst.keyword_span,
            messages::deprecated_maintainer(),
        );
    }
    if inst.arguments.is_empty() {
        out.push(
            DiagnosticCode::ArgumentMissing,
            inst.keyword_span,
            messages::argument_missing(&inst.keyword),
        );
        return;
    }
    let json_volume = inst.kind == Keyword::Volume && json_form::is_json_volume(inst);
    if inst.kind.validates_quotes() && !json_volume {
        check_quotes(inst, out);
    }

    let flags = inst.flags();
    if inst.kind.is_flag_bearing() {
        flags::check_flags(inst, &flags, out);
    }
    match inst.kind {
        Keyword::Add | Keyword::Copy => json_form::check_copy_sources(inst, out),
        Keyword::Arg => properties::check_arg(inst, out),
        Keyword::Cmd | Keyword::Entrypoint | Keyword::Run => {
            json_form::check_single_quoted_exec(inst, out)
        }
        Keyword::Env | Keyword::Label => properties::check_pairs(inst, out),
        Keyword::Expose => ports::check_expose(inst, out),
        Keyword::From => from::check_from(inst, out),
        Keyword::Healthcheck => healthcheck::check_healthcheck(inst, &flags, out),
        Keyword::Onbuild => onbuild::check_onbuild(inst, out),
        Keyword::Shell => json_form::check_shell(inst, out),
        Keyword::Stopsignal => check_stopsignal(inst, out),
        Keyword::User => properties::check_single_argument(inst, out),
        Keyword::Volume => json_form::check_volume(inst, out),
        Keyword::Maintainer | Keyword::Workdir | Keyword::Unknown => {}
    }
}

fn check_quotes(inst: &Instruction, out: &mut Emitter<'_>) {
    for arg in &inst.arguments {
        let Some(open) = arg.open_quote else {
            continue;
        };
        let span = Span::new(open.offset, arg.span().end.max(open.offset));
        if open.quote == '\'' {
            out.push(
                DiagnosticCode::SyntaxMissingSingleQuote,
                span,
                messages::missing_single_quote(),
            );
        } else {
            out.push(
                DiagnosticCode::SyntaxMissingDoubleQuote,
                span,
                messages::missing_double_quote(),
            );
        }
    }
}

pub fn is_valid_signal(signal: &str) -> bool {
    (signal.starts_with("SIG") && signal.len() > 3)
        || signal.contains('$')
        || (!signal.is_empty() && signal.bytes().all(|b| b.is_ascii_digit()))
}

fn check_stopsignal(inst: &Instruction, out: &mut Emitter<'_>) {
    if let Some(first) = inst.arguments.first() {
        if !is_valid_signal(first.text()) {
            out.push(
                DiagnosticCode::InvalidSignal,
                first.span(),
                messages::invalid_signal(first.text()),
            );
        }
    }
    properties::check_single_argument(inst, out);
}

fn check_duplicate_stages(scopes: &ScopeTable, out: &mut Emitter<'_>) {
    let mut by_name: HashMap<String, Vec<Span>> = HashMap::new();
    for stage in &scopes.stages {
        if let (Some(name), Some(span)) = (&stage.name, stage.name_span) {
            by_name
                .entry(name.to_ascii_lowercase())
                .or_default()
                .push(span);
        }
    }
    for (name, spans) in by_name {
        if spans.len() < 2 {
            continue;
        }
        for span in spans {
            out.push(
                DiagnosticCode::DuplicateBuildStageName,
                span,
                messages::duplicate_stage(&name),
            );
        }
    }
}

fn check_multiple_instructions(file: &Dockerfile, scopes: &ScopeTable, out: &mut Emitter<'_>) {
    let settings = out.settings();
    let checked: [(Keyword, SeverityLevel); 3] = [
        (Keyword::Cmd, settings.instruction_cmd_multiple),
        (Keyword::Entrypoint, settings.instruction_entrypoint_multiple),
        (Keyword::Healthcheck, settings.instruction_healthcheck_multiple),
    ];
    for (kind, level) in checked {
        let mut per_scope: HashMap<_, Vec<&Instruction>> = HashMap::new();
        for (idx, inst) in file.instructions.iter().enumerate() {
            if inst.kind == kind {
                per_scope.entry(scopes.scope_of(idx)).or_default().push(inst);
            }
        }
        for group in per_scope.values() {
            let Some((_, earlier)) = group.split_last() else {
                continue;
            };
            for inst in earlier {
                out.push_configured(
                    level,
                    DiagnosticCode::MultipleInstructions,
                    inst.keyword_span,
                    messages::multiple_instructions(kind.as_str()),
                );
            }
        }
    }
}
