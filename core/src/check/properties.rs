use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::{Instruction, Keyword};

/// Extra arguments beyond the first are flagged one by one.
pub(super) fn check_single_argument(inst: &Instruction, out: &mut Emitter<'_>) {
    for extra in inst.arguments.iter().skip(1) {
        out.push(
            DiagnosticCode::ArgumentRequiresOne,
            extra.span(),
            messages::requires_one(&inst.keyword),
        );
    }
}

pub(super) fn check_arg(inst: &Instruction, out: &mut Emitter<'_>) {
    if let Some(first) = inst.arguments.first() {
        if first.text().starts_with('=') {
            out.push(
                DiagnosticCode::SyntaxMissingNames,
                first.span(),
                messages::missing_names(Keyword::Arg.as_str()),
            );
        }
    }
    check_single_argument(inst, out);
}

/// `ENV` and `LABEL` pairs. A lone name with no value is an argument count error.
pub(super) fn check_pairs(inst: &Instruction, out: &mut Emitter<'_>) {
    let properties = inst.properties();
    if let [prop] = properties.as_slice() {
        if !prop.name.is_empty() && prop.value.is_none() {
            out.push(
                DiagnosticCode::ArgumentRequiresTwo,
                prop.span,
                messages::requires_two(&inst.keyword),
            );
            return;
        }
    }
    for prop in properties {
        if prop.legacy {
            continue;
        }
        if prop.name.is_empty() {
            out.push(
                DiagnosticCode::SyntaxMissingNames,
                prop.span,
                messages::missing_names(inst.kind.as_str()),
            );
        } else if prop.value.is_none() {
            out.push(
                DiagnosticCode::SyntaxMissingEquals,
                prop.span,
                messages::missing_equals(&prop.name),
            );
        }
    }
}
