use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::Instruction;
use crate::token::json::{JsonError, looks_like_array, parse_string_array};

pub(super) fn is_json_volume(inst: &Instruction) -> bool {
    looks_like_array(&inst.region)
}

pub(super) fn check_volume(inst: &Instruction, out: &mut Emitter<'_>) {
    if !is_json_volume(inst) {
        return;
    }
    let parsed = parse_string_array(&inst.region, '"', inst.escape);
    if let Err(JsonError::Unexpected { span, found }) = parsed {
        out.push(
            DiagnosticCode::UnexpectedToken,
            span,
            messages::unexpected_token(found),
        );
    }
}

pub(super) fn check_shell(inst: &Instruction, out: &mut Emitter<'_>) {
    match parse_string_array(&inst.region, '"', inst.escape) {
        Ok(array) if array.strings.is_empty() => out.push(
            DiagnosticCode::ShellRequiresOne,
            array.span,
            messages::shell_requires_one(),
        ),
        Ok(_) => {}
        Err(_) => out.push(
            DiagnosticCode::ShellJsonForm,
            inst.region.trim().full_span(),
            messages::shell_json_form(),
        ),
    }
}

/// Exec form written with single quotes, which Docker silently runs through a shell.
pub(super) fn check_single_quoted_exec(inst: &Instruction, out: &mut Emitter<'_>) {
    if !looks_like_array(&inst.region) {
        return;
    }
    if parse_string_array(&inst.region, '"', inst.escape).is_ok() {
        return;
    }
    if let Ok(array) = parse_string_array(&inst.region, '\'', inst.escape) {
        let level = out.settings().instruction_json_in_single_quotes;
        out.push_configured(
            level,
            DiagnosticCode::JsonInSingleQuotes,
            array.span,
            messages::json_in_single_quotes(),
        );
    }
}

/// `COPY` and `ADD` need a source and a destination.
pub(super) fn check_copy_sources(inst: &Instruction, out: &mut Emitter<'_>) {
    let region = inst.positional_region();
    let count = match parse_string_array(&region, '"', inst.escape) {
        Ok(array) => array.strings.len(),
        Err(_) => inst.positional().len(),
    };
    if count >= 2 {
        return;
    }
    let span = if region.is_empty() {
        inst.keyword_span
    } else {
        region.full_span()
    };
    out.push(
        DiagnosticCode::ArgumentRequiresAtLeastTwo,
        span,
        messages::requires_at_least_two(&inst.keyword),
    );
}
