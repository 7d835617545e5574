//! `$name` and `${name...}` scanning.

/// A variable reference found in a piece of text, as byte offsets into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReference {
    pub name_start: usize,
    pub name_end: usize,
    /// From the `$` through the closing brace, if any.
    pub start: usize,
    pub end: usize,
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Finds variable references, skipping single-quoted text and escaped characters.
pub fn scan_references(text: &str, escape: char) -> Vec<RawReference> {
    let mut out = Vec::new();
    scan_into(text, 0, text.len(), escape, &mut out);
    out
}

fn scan_into(text: &str, from: usize, to: usize, escape: char, out: &mut Vec<RawReference>) {
    let bytes = text.as_bytes();
    let escape_is_ascii = escape.is_ascii();
    let mut i = from;
    let mut single = false;
    while i < to {
        let b = bytes[i];
        if single {
            if b == b'\'' {
                single = false;
            }
            i += 1;
            continue;
        }
        if escape_is_ascii && b == escape as u8 {
            i += 2;
            continue;
        }
        match b {
            b'\'' => {
                single = true;
                i += 1;
            }
            b'$' if i + 1 < to && bytes[i + 1] == b'{' => {
                let name_start = i + 2;
                let mut j = name_start;
                while j < to && is_name_char(bytes[j]) {
                    j += 1;
                }
                let name_end = j;
                let mut depth = 1;
                let mut k = j;
                while k < to {
                    match bytes[k] {
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    k += 1;
                }
                let end = if k < to { k + 1 } else { to };
                if name_end > name_start && is_name_start(bytes[name_start]) {
                    out.push(RawReference {
                        name_start,
                        name_end,
                        start: i,
                        end,
                    });
                }
                // Modifier words like `${a:-$b}` may hold references of their own.
                if name_end < k {
                    scan_into(text, name_end, k.min(to), escape, out);
                }
                i = end;
            }
            b'$' if i + 1 < to && is_name_start(bytes[i + 1]) => {
                let mut j = i + 1;
                while j < to && is_name_char(bytes[j]) {
                    j += 1;
                }
                out.push(RawReference {
                    name_start: i + 1,
                    name_end: j,
                    start: i,
                    end: j,
                });
                i = j;
            }
            _ => i += 1,
        }
    }
}
