use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::{Flag, Instruction};

pub const DURATION_FLAGS: [&str; 4] = ["interval", "timeout", "start-period", "start-interval"];

const NANOS_PER_MS: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    Invalid,
    MissingUnit,
    UnknownUnit(String),
}

fn unit_nanos(unit: &str) -> Option<f64> {
    Some(match unit {
        "ns" => 1.0,
        "us" | "\u{00b5}s" | "\u{03bc}s" => 1_000.0,
        "ms" => NANOS_PER_MS,
        "s" => 1_000_000_000.0,
        "m" => 60_000_000_000.0,
        "h" => 3_600_000_000_000.0,
        _ => return None,
    })
}

/// Parses a Go-style duration such as `1h30m` or `-1.5s` into nanoseconds.
pub fn parse_duration(value: &str) -> Result<f64, DurationError> {
    let (negative, body) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    if body == "0" {
        return Ok(0.0);
    }
    if body.is_empty() {
        return Err(DurationError::Invalid);
    }

    let mut total = 0.0;
    let mut rest = body;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        if number.is_empty() || number == "." || number.matches('.').count() > 1 {
            return Err(DurationError::Invalid);
        }
        let amount: f64 = number.parse().map_err(|_| DurationError::Invalid)?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        if unit.is_empty() {
            return Err(DurationError::MissingUnit);
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;
        total += amount * scale;
        rest = &rest[unit_len..];
    }
    Ok(if negative { -total } else { total })
}

fn check_duration(flag: &Flag, value: &str, out: &mut Emitter<'_>) {
    let span = flag.value_span.unwrap_or(flag.span);
    match parse_duration(value) {
        Ok(nanos) if nanos < NANOS_PER_MS => out.push(
            DiagnosticCode::FlagLessThan1ms,
            span,
            messages::less_than_1ms(&flag.name),
        ),
        Ok(_) => {}
        Err(DurationError::Invalid) => out.push(
            DiagnosticCode::FlagInvalidDuration,
            span,
            messages::invalid_duration(value),
        ),
        Err(DurationError::MissingUnit) => out.push(
            DiagnosticCode::FlagMissingDuration,
            span,
            messages::missing_duration_unit(value),
        ),
        Err(DurationError::UnknownUnit(unit)) => out.push(
            DiagnosticCode::FlagUnknownUnit,
            span,
            messages::unknown_duration_unit(&unit, value),
        ),
    }
}

pub(super) fn check_healthcheck(inst: &Instruction, flags: &[Flag], out: &mut Emitter<'_>) {
    for flag in flags {
        let Some(value) = flag.value.as_deref().filter(|v| !v.is_empty()) else {
            continue;
        };
        if DURATION_FLAGS.contains(&flag.name.as_str()) {
            check_duration(flag, value, out);
        } else if flag.name == "retries" {
            let span = flag.value_span.unwrap_or(flag.span);
            match value.parse::<i64>() {
                Ok(n) if n < 1 => out.push(
                    DiagnosticCode::FlagAtLeastOneRetry,
                    span,
                    messages::at_least_one_retry(),
                ),
                Ok(_) => {}
                Err(_) => out.push(
                    DiagnosticCode::InvalidSyntax,
                    span,
                    messages::invalid_syntax(value),
                ),
            }
        }
    }

    let positional = inst.positional();
    let Some(first) = positional.first() else {
        out.push(
            DiagnosticCode::HealthcheckCmdArgumentMissing,
            inst.keyword_span,
            messages::healthcheck_cmd_missing(),
        );
        return;
    };
    if first.text().eq_ignore_ascii_case("NONE") {
        for extra in &positional[1..] {
            out.push(
                DiagnosticCode::ArgumentUnnecessary,
                extra.span(),
                messages::argument_unnecessary(),
            );
        }
    } else if !first.text().eq_ignore_ascii_case("CMD") || positional.len() == 1 {
        out.push(
            DiagnosticCode::HealthcheckCmdArgumentMissing,
            first.span(),
            messages::healthcheck_cmd_missing(),
        );
    }
}
