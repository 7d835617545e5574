use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::{Instruction, Keyword};

use super::check_instruction;

pub(super) fn check_onbuild(inst: &Instruction, out: &mut Emitter<'_>) {
    let Some(trigger) = inst.onbuild_trigger() else {
        return;
    };
    match trigger.kind {
        Keyword::Onbuild => out.push(
            DiagnosticCode::OnbuildChainingDisallowed,
            trigger.keyword_span,
            messages::onbuild_chaining(),
        ),
        Keyword::From | Keyword::Maintainer => out.push(
            DiagnosticCode::OnbuildTriggerDisallowed,
            trigger.keyword_span,
            messages::onbuild_trigger(&trigger.keyword),
        ),
        _ => check_instruction(&trigger, out),
    }
}
