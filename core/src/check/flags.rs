use std::collections::HashMap;

use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::{Flag, Instruction, Keyword};

/// Flags an instruction accepts: those that take a value and boolean switches.
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub values: &'static [&'static str],
    pub booleans: &'static [&'static str],
}

impl FlagSpec {
    pub fn for_keyword(kind: Keyword) -> FlagSpec {
        match kind {
            Keyword::Add => FlagSpec {
                values: &["chown", "chmod", "checksum", "exclude"],
                booleans: &["link", "keep-git-dir"],
            },
            Keyword::Copy => FlagSpec {
                values: &["from", "chown", "chmod", "exclude"],
                booleans: &["link", "parents"],
            },
            Keyword::From => FlagSpec {
                values: &["platform"],
                booleans: &[],
            },
            Keyword::Healthcheck => FlagSpec {
                values: &["interval", "timeout", "start-period", "start-interval", "retries"],
                booleans: &[],
            },
            _ => FlagSpec {
                values: &[],
                booleans: &[],
            },
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.values.iter().chain(self.booleans.iter()).copied()
    }

    pub fn knows(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn is_boolean(&self, name: &str) -> bool {
        self.booleans.contains(&name)
    }
}

pub(super) fn check_flags(inst: &Instruction, flags: &[Flag], out: &mut Emitter<'_>) {
    let spec = FlagSpec::for_keyword(inst.kind);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for flag in flags {
        *counts.entry(flag.name.as_str()).or_default() += 1;
    }

    for flag in flags {
        if !spec.knows(&flag.name) {
            let span = if flag.name.is_empty() {
                flag.span
            } else {
                flag.name_span
            };
            out.push(
                DiagnosticCode::FlagUnknown,
                span,
                messages::flag_unknown(&flag.name),
            );
            continue;
        }
        if counts.get(flag.name.as_str()).copied().unwrap_or(0) > 1 {
            out.push(
                DiagnosticCode::FlagDuplicate,
                flag.name_span,
                messages::flag_duplicate(&flag.name),
            );
        }
        match (&flag.value, spec.is_boolean(&flag.name)) {
            (None, false) => out.push(
                DiagnosticCode::FlagMissingValue,
                flag.name_span,
                messages::flag_missing_value(&flag.name),
            ),
            (Some(value), true)
                if !value.eq_ignore_ascii_case("true") && !value.eq_ignore_ascii_case("false") =>
            {
                out.push(
                    DiagnosticCode::FlagExpectedBooleanValue,
                    flag.value_span.unwrap_or(flag.span),
                    messages::flag_expected_boolean(&flag.name, value),
                );
            }
            _ => {}
        }
    }
}
