use std::borrow::Cow;

use memchr::memchr;

use crate::constants::{entity_for, QUOT};

/// Replace every `"` with `&quot;`, borrowing when there is none.
pub fn escape_quotes(value: &str) -> Cow<'_, str> {
    let Some(first) = memchr(b'"', value.as_bytes()) else {
        return Cow::Borrowed(value);
    };
    let mut out = String::with_capacity(value.len() + QUOT.len());
    out.push_str(&value[..first]);
    escape_quotes_into(&mut out, &value[first..]);
    Cow::Owned(out)
}

pub fn escape_quotes_into(out: &mut String, value: &str) {
    let bytes = value.as_bytes();
    let mut start = 0;
    while let Some(pos) = memchr(b'"', &bytes[start..]) {
        let idx = start + pos;
        out.push_str(&value[start..idx]);
        out.push_str(QUOT);
        start = idx + 1;
    }
    out.push_str(&value[start..]);
}

/// Offset of the first byte the default encoder must rewrite.
pub fn find_html_special(bytes: &[u8], ascii_only: bool) -> Option<usize> {
    bytes
        .iter()
        .position(|&b| entity_for(b).is_some() || (ascii_only && b & 0x80 != 0))
}

pub fn encode_html_into(out: &mut String, value: &str, ascii_only: bool) {
    let bytes = value.as_bytes();
    let mut start = 0;
    for (idx, ch) in value.char_indices() {
        let replacement = if ch.is_ascii() {
            entity_for(bytes[idx])
        } else {
            None
        };
        if let Some(entity) = replacement {
            out.push_str(&value[start..idx]);
            out.push_str(entity);
            start = idx + 1;
        } else if ascii_only && !ch.is_ascii() {
            out.push_str(&value[start..idx]);
            push_numeric_reference(out, ch);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(&value[start..]);
}

fn push_numeric_reference(out: &mut String, ch: char) {
    use std::fmt::Write;

    // Writing to a String cannot fail.
    let _ = write!(out, "&#x{:X};", ch as u32);
}
