pub mod writer;

use std::borrow::Cow;

pub use writer::{ContentWriter, StringWriter, TextWriter};

use crate::{text::string::{encode_html_into, find_html_special}, Result};

/// Converts arbitrary text into an HTML-safe representation.
pub trait HtmlEncoder: Send + Sync {
    fn encode<'a>(&self, input: &'a str) -> Result<Cow<'a, str>>;
}

impl<E: HtmlEncoder + ?Sized> HtmlEncoder for &E {
    fn encode<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        (**self).encode(input)
    }
}

/// Encodes `&`, `<`, `>`, `"` and `'` as character references.
///
/// With [`DefaultHtmlEncoder::ascii_only`] every non-ASCII scalar is also
/// written as a hexadecimal reference, so output stays within Basic Latin.
///
/// # Examples
/// ```
/// use tag_content::{DefaultHtmlEncoder, HtmlEncoder};
///
/// let encoder = DefaultHtmlEncoder::new();
/// assert_eq!(encoder.encode("a < b").unwrap(), "a &lt; b");
///
/// let ascii = DefaultHtmlEncoder::ascii_only();
/// assert_eq!(ascii.encode("caf\u{e9}").unwrap(), "caf&#xE9;");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultHtmlEncoder {
    ascii_only: bool,
}

impl DefaultHtmlEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ascii_only() -> Self {
        Self { ascii_only: true }
    }

    pub fn is_ascii_only(&self) -> bool {
        self.ascii_only
    }
}

impl HtmlEncoder for DefaultHtmlEncoder {
    fn encode<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        let Some(first) = find_html_special(input.as_bytes(), self.ascii_only) else {
            return Ok(Cow::Borrowed(input));
        };
        let mut out = String::with_capacity(input.len() + input.len() / 4 + 8);
        out.push_str(&input[..first]);
        encode_html_into(&mut out, &input[first..], self.ascii_only);
        Ok(Cow::Owned(out))
    }
}

/// Returns its input untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThroughEncoder;

impl HtmlEncoder for PassThroughEncoder {
    fn encode<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_default_encoder_borrows_clean_input() {
        let encoder = DefaultHtmlEncoder::new();
        let encoded = encoder.encode("nothing to see").unwrap();
        assert!(matches!(encoded, Cow::Borrowed(_)));
    }

    #[rstest::rstest]
    #[case("", "")]
    #[case("<script>", "&lt;script&gt;")]
    #[case("a & b", "a &amp; b")]
    #[case("\"quoted\"", "&quot;quoted&quot;")]
    #[case("it's", "it&#39;s")]
    #[case("&amp;", "&amp;amp;")]
    #[case("\u{e9}t\u{e9}", "\u{e9}t\u{e9}")]
    fn test_default_encoder(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(DefaultHtmlEncoder::new().encode(input).unwrap(), expected);
    }

    #[rstest::rstest]
    fn test_ascii_only_encoder() {
        let encoder = DefaultHtmlEncoder::ascii_only();
        assert!(encoder.is_ascii_only());
        assert_eq!(encoder.encode("\u{e9}<").unwrap(), "&#xE9;&lt;");
        assert_eq!(encoder.encode("plain").unwrap(), "plain");
    }

    #[rstest::rstest]
    fn test_pass_through_encoder() {
        assert_eq!(PassThroughEncoder.encode("<b>\"</b>").unwrap(), "<b>\"</b>");
    }

    #[rstest::rstest]
    fn test_encoder_by_reference() {
        fn encode_with<E: HtmlEncoder>(encoder: E, input: &str) -> String {
            encoder.encode(input).unwrap().into_owned()
        }

        let encoder = DefaultHtmlEncoder::new();
        assert_eq!(encode_with(&encoder, "<"), "&lt;");
    }
}
