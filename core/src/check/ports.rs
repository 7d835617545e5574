use once_cell::sync::Lazy;
use regex::Regex;

use crate::diag::{DiagnosticCode, Emitter, messages};
use crate::token::Instruction;

static PORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:[-:]\d+)?$").expect("port pattern is valid"));

const PROTOCOLS: [&str; 2] = ["tcp", "udp"];

/// `PORT[-PORT]` or `PORT[:EXPOSED]`, each part a run of digits.
pub fn is_valid_port(port: &str) -> bool {
    PORT_RE.is_match(port)
}

pub fn is_valid_protocol(proto: &str) -> bool {
    PROTOCOLS.iter().any(|p| p.eq_ignore_ascii_case(proto))
}

pub(super) fn check_expose(inst: &Instruction, out: &mut Emitter<'_>) {
    for arg in &inst.arguments {
        let text = arg.text();
        if text.contains('$') {
            continue;
        }
        let (port, proto) = match text.find('/') {
            Some(slash) => (&text[..slash], Some((slash + 1, &text[slash + 1..]))),
            None => (text, None),
        };
        if !is_valid_port(port) {
            out.push(
                DiagnosticCode::InvalidPort,
                arg.span_of(0, port.len()),
                messages::invalid_port(port),
            );
        }
        if let Some((start, proto)) = proto {
            if !is_valid_protocol(proto) {
                out.push(
                    DiagnosticCode::InvalidProtocol,
                    arg.span_of(start, text.len()),
                    messages::invalid_protocol(proto),
                );
            }
        }
    }
}
