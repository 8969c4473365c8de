use std::fmt::Write;

use regex::bytes::Regex;

use crate::expression::Truth;

/// Byte-exact SQL LIKE. `%` matches any run of bytes, `_` exactly one byte,
/// and a pattern position starting with the escape sequence makes the byte
/// after it literal. The pattern is compiled to an anchored byte regex with
/// Unicode matching disabled, so non-UTF-8 values and patterns are fine.
pub fn like_match(value: &[u8], pattern: &[u8], escape: Option<&[u8]>) -> Truth {
    let mut re = String::from("(?s-u)^");
    let mut i = 0;
    while i < pattern.len() {
        if let Some(esc) = escape {
            if !esc.is_empty() && pattern[i..].starts_with(esc) && i + esc.len() < pattern.len() {
                literal_byte(&mut re, pattern[i + esc.len()]);
                i += esc.len() + 1;
                continue;
            }
        }
        match pattern[i] {
            b'%' => re.push_str(".*"),
            b'_' => re.push('.'),
            b => literal_byte(&mut re, b),
        }
        i += 1;
    }
    re.push('$');

    match Regex::new(&re) {
        Ok(rx) => Truth::from_bool(rx.is_match(value)),
        Err(_) => Truth::Unknown,
    }
}

fn literal_byte(re: &mut String, b: u8) {
    let _ = write!(re, "\\x{b:02X}");
}
