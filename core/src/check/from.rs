use once_cell::sync::Lazy;
use regex::Regex;

use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::Instruction;

static STAGE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_.-]*$").expect("stage name pattern is valid"));

pub fn is_valid_stage_name(name: &str) -> bool {
    STAGE_NAME_RE.is_match(name)
}

pub(super) fn check_from(inst: &Instruction, out: &mut Emitter<'_>) {
    let positional = inst.positional();
    match positional {
        [] => out.push(
            DiagnosticCode::ArgumentMissing,
            inst.keyword_span,
            messages::argument_missing(&inst.keyword),
        ),
        [_] => {}
        [_, as_kw, name] => {
            if !as_kw.text().eq_ignore_ascii_case("as") {
                out.push(DiagnosticCode::InvalidAs, as_kw.span(), messages::invalid_as());
            } else if !is_valid_stage_name(name.text()) {
                out.push(
                    DiagnosticCode::InvalidBuildStageName,
                    name.span(),
                    messages::invalid_stage_name(name.text()),
                );
            }
        }
        [_, as_kw, name, extra @ ..]
            if as_kw.text().eq_ignore_ascii_case("as") && is_valid_stage_name(name.text()) =>
        {
            for arg in extra {
                out.push(
                    DiagnosticCode::ArgumentExtra,
                    arg.span(),
                    messages::argument_extra(arg.text()),
                );
            }
        }
        [first, .., last] => out.push(
            DiagnosticCode::ArgumentRequiresOneOrThree,
            first.span().cover(last.span()),
            messages::requires_one_or_three(),
        ),
    }
}
