pub const AMP: &str = "&amp;";
pub const LT: &str = "&lt;";
pub const GT: &str = "&gt;";
pub const QUOT: &str = "&quot;";
pub const APOS: &str = "&#39;";

/// Replacement for a single byte that HTML text must not carry literally.
#[inline]
pub fn entity_for(byte: u8) -> Option<&'static str> {
    match byte {
        b'&' => Some(AMP),
        b'<' => Some(LT),
        b'>' => Some(GT),
        b'"' => Some(QUOT),
        b'\'' => Some(APOS),
        _ => None,
    }
}
