//! CSS identifier escaping.
//!
//! Mirrors the serialization rules for identifiers: ASCII alphanumerics,
//! `-`, `_`, and all non-ASCII pass through; a leading digit becomes a hex
//! escape; everything else gets a backslash escape. Any id or class token
//! interpolated into a selector must go through here first.

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || (ch as u32) >= 0x80
}

pub fn escape_ident(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.chars().enumerate() {
        if i == 0 && ch.is_ascii_digit() {
            out.push_str(&format!("\\{:x} ", ch as u32));
        } else if is_ident_char(ch) {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

/// Escape a string for interpolation inside `[attr="..."]`.
pub fn escape_attr_value(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Consume one possibly-escaped char starting at byte `i`; returns the char
/// and the byte index after it. Hex escapes (`\3a `) and literal escapes
/// (`\:`) both decode; a trailing lone backslash decodes to itself.
pub fn unescape_at(s: &str, i: usize) -> (char, usize) {
    let bytes = s.as_bytes();
    let ch = s[i..].chars().next().unwrap_or('\0');
    if ch != '\\' || i + 1 >= s.len() {
        return (ch, i + ch.len_utf8());
    }
    let next = s[i + 1..].chars().next().unwrap_or('\0');
    if next.is_ascii_hexdigit() {
        let mut j = i + 1;
        let mut value: u32 = 0;
        let mut digits = 0;
        while j < s.len() && digits < 6 && bytes[j].is_ascii_hexdigit() {
            value = value * 16 + (bytes[j] as char).to_digit(16).unwrap_or(0);
            j += 1;
            digits += 1;
        }
        if j < s.len() && bytes[j] == b' ' {
            j += 1;
        }
        return (char::from_u32(value).unwrap_or('\u{fffd}'), j);
    }
    (next, i + 1 + next.len_utf8())
}
