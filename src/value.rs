use std::borrow::Cow;
use std::fmt;

use smol_str::SmolStr;

use crate::{encode::TextWriter, num::number, Result};

/// Text that is already safe for HTML output and is never re-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HtmlString(SmolStr);

impl HtmlString {
    pub fn new(markup: impl AsRef<str>) -> Self {
        Self(SmolStr::new(markup))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HtmlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value that renders itself by writing incrementally to a target.
pub trait WriteTo {
    fn write_to(&self, writer: &mut dyn TextWriter) -> Result<()>;
}

/// Deferred output backed by a closure.
///
/// # Examples
/// ```
/// use tag_content::{HelperResult, StringWriter, TextWriter, WriteTo, Charset};
///
/// let helper = HelperResult::new(|w: &mut dyn TextWriter| {
///     w.write_str("<li>")?;
///     w.write_str("one")?;
///     w.write_str("</li>")
/// });
/// let mut out = StringWriter::new(Charset::Utf8);
/// helper.write_to(&mut out)?;
/// assert_eq!(out.finish(), "<li>one</li>");
/// # Ok::<(), tag_content::Error>(())
/// ```
pub struct HelperResult<F> {
    write: F,
}

impl<F> HelperResult<F>
where
    F: Fn(&mut dyn TextWriter) -> Result<()>,
{
    pub fn new(write: F) -> Self {
        Self { write }
    }
}

impl<F> WriteTo for HelperResult<F>
where
    F: Fn(&mut dyn TextWriter) -> Result<()>,
{
    fn write_to(&self, writer: &mut dyn TextWriter) -> Result<()> {
        (self.write)(writer)
    }
}

impl<F> fmt::Debug for HelperResult<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperResult").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Raw,
    Deferred,
    Text,
    Display,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Raw => "raw",
            ValueKind::Deferred => "deferred",
            ValueKind::Text => "text",
            ValueKind::Display => "display",
        }
    }
}

/// Everything that can be appended, resolved to one kind up front.
#[derive(Clone)]
pub enum HtmlValue<'a> {
    Null,
    Raw(&'a HtmlString),
    Deferred(&'a dyn WriteTo),
    Text(Cow<'a, str>),
    Display(&'a dyn fmt::Display),
}

impl<'a> HtmlValue<'a> {
    pub fn deferred(helper: &'a dyn WriteTo) -> Self {
        HtmlValue::Deferred(helper)
    }

    pub fn display(value: &'a dyn fmt::Display) -> Self {
        HtmlValue::Display(value)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            HtmlValue::Null => ValueKind::Null,
            HtmlValue::Raw(_) => ValueKind::Raw,
            HtmlValue::Deferred(_) => ValueKind::Deferred,
            HtmlValue::Text(_) => ValueKind::Text,
            HtmlValue::Display(_) => ValueKind::Display,
        }
    }

    /// String form fed to the encoder; `None` for the kinds that bypass it.
    ///
    /// A `Display` impl that returns `fmt::Error` yields `ErrorKind::Render`.
    pub fn to_text(&self) -> Result<Option<Cow<'a, str>>> {
        match self {
            HtmlValue::Text(text) => Ok(Some(text.clone())),
            HtmlValue::Display(value) => display_to_string(*value).map(|s| Some(Cow::Owned(s))),
            HtmlValue::Null | HtmlValue::Raw(_) | HtmlValue::Deferred(_) => Ok(None),
        }
    }
}

pub(crate) fn display_to_string(value: &dyn fmt::Display) -> Result<String> {
    use std::fmt::Write;

    let mut out = String::new();
    write!(out, "{value}")?;
    Ok(out)
}

impl fmt::Debug for HtmlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlValue::Null => f.write_str("Null"),
            HtmlValue::Raw(markup) => f.debug_tuple("Raw").field(markup).finish(),
            HtmlValue::Deferred(_) => f.write_str("Deferred(..)"),
            HtmlValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            HtmlValue::Display(value) => f
                .debug_tuple("Display")
                .field(&format_args!("{value}"))
                .finish(),
        }
    }
}

impl<'a> From<&'a str> for HtmlValue<'a> {
    fn from(value: &'a str) -> Self {
        HtmlValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for HtmlValue<'a> {
    fn from(value: &'a String) -> Self {
        HtmlValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a HtmlString> for HtmlValue<'a> {
    fn from(value: &'a HtmlString) -> Self {
        HtmlValue::Raw(value)
    }
}

impl<'a, F> From<&'a HelperResult<F>> for HtmlValue<'a>
where
    F: Fn(&mut dyn TextWriter) -> Result<()>,
{
    fn from(value: &'a HelperResult<F>) -> Self {
        HtmlValue::Deferred(value)
    }
}

impl<'a, T> From<Option<T>> for HtmlValue<'a>
where
    T: Into<HtmlValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(HtmlValue::Null, Into::into)
    }
}

impl<'a> From<&'a bool> for HtmlValue<'a> {
    fn from(value: &'a bool) -> Self {
        HtmlValue::Text(Cow::Borrowed(if *value { "true" } else { "false" }))
    }
}

/// Numbers are stringified ahead of time since `HtmlValue` only borrows.
///
/// # Examples
/// ```
/// use tag_content::{Number, HtmlValue};
///
/// let n = Number::from(2.50f64);
/// assert_eq!(n.as_str(), "2.5");
/// assert_eq!(HtmlValue::from(&n).to_text()?.as_deref(), Some("2.5"));
/// # Ok::<(), tag_content::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(SmolStr);

impl Number {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! number_from {
    ($format:path => $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(SmolStr::new($format(value.into())))
                }
            }
        )*
    };
}

number_from!(number::format_i64 => i8, i16, i32, i64);
number_from!(number::format_u64 => u8, u16, u32, u64);
number_from!(number::format_f64 => f64);
number_from!(number::format_f32 => f32);

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number(SmolStr::new(number::format_u64(value as u64)))
    }
}

impl From<isize> for Number {
    fn from(value: isize) -> Self {
        Number(SmolStr::new(number::format_i64(value as i64)))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(value: &serde_json::Number) -> Self {
        Number(SmolStr::new(number::format_json_number(value)))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'a> From<&'a Number> for HtmlValue<'a> {
    fn from(value: &'a Number) -> Self {
        HtmlValue::Text(Cow::Borrowed(value.as_str()))
    }
}

/// JSON scalars render as their plain text; strings are not re-quoted and
/// numbers are formatted like [`Number`]. Arrays and objects render as
/// compact JSON.
impl<'a> From<&'a serde_json::Value> for HtmlValue<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => HtmlValue::Null,
            serde_json::Value::Bool(b) => HtmlValue::from(b),
            serde_json::Value::String(s) => HtmlValue::Text(Cow::Borrowed(s)),
            serde_json::Value::Number(n) => {
                HtmlValue::Text(Cow::Owned(number::format_json_number(n)))
            }
            other => HtmlValue::Display(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[rstest::rstest]
    fn test_html_string() {
        let markup = HtmlString::new("<b>bold</b>");
        assert_eq!(markup.as_str(), "<b>bold</b>");
        assert_eq!(markup.to_string(), "<b>bold</b>");
        assert!(!markup.is_empty());
        assert!(HtmlString::empty().is_empty());
    }

    #[rstest::rstest]
    fn test_kinds() {
        let markup = HtmlString::new("<i>");
        let helper = HelperResult::new(|w: &mut dyn TextWriter| w.write_str("x"));
        let owned = String::from("text");
        let n = 7u8;

        assert_eq!(HtmlValue::from("s").kind(), ValueKind::Text);
        assert_eq!(HtmlValue::from(&owned).kind(), ValueKind::Text);
        assert_eq!(HtmlValue::from(&markup).kind(), ValueKind::Raw);
        assert_eq!(HtmlValue::from(&helper).kind(), ValueKind::Deferred);
        assert_eq!(HtmlValue::display(&n).kind(), ValueKind::Display);
        assert_eq!(HtmlValue::from(None::<&str>).kind(), ValueKind::Null);
        assert_eq!(HtmlValue::from(Some("x")).kind(), ValueKind::Text);
    }

    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn text_of(value: HtmlValue<'_>) -> Option<String> {
        value.to_text().unwrap().map(Cow::into_owned)
    }

    #[rstest::rstest]
    fn test_to_text() {
        let markup = HtmlString::new("<i>");
        let n = 42;

        assert_eq!(text_of(HtmlValue::from("a<b")).as_deref(), Some("a<b"));
        assert_eq!(text_of(HtmlValue::display(&n)).as_deref(), Some("42"));
        assert!(text_of(HtmlValue::from(&markup)).is_none());
        assert!(text_of(HtmlValue::Null).is_none());
        assert_eq!(text_of(HtmlValue::from(&true)).as_deref(), Some("true"));
    }

    #[rstest::rstest]
    fn test_failing_display_is_render_error() {
        let err = HtmlValue::display(&Unprintable).to_text().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Render);
        assert_eq!(err.kind.as_str(), "render");
    }

    #[rstest::rstest]
    fn test_debug_with_failing_display_returns_error() {
        use std::fmt::Write;

        let mut out = String::new();
        assert!(write!(out, "{:?}", HtmlValue::display(&Unprintable)).is_err());

        let n = 5;
        assert_eq!(format!("{:?}", HtmlValue::display(&n)), "Display(5)");
    }

    #[rstest::rstest]
    #[case(Number::from(-3i32), "-3")]
    #[case(Number::from(255u8), "255")]
    #[case(Number::from(10usize), "10")]
    #[case(Number::from(0.25f64), "0.25")]
    #[case(Number::from(2.0f32), "2")]
    #[case(Number::from(&serde_json::Number::from(-9i64)), "-9")]
    #[case(Number::from(&serde_json::Number::from(u64::MAX)), "18446744073709551615")]
    fn test_numbers(#[case] number: Number, #[case] expected: &str) {
        assert_eq!(number.as_str(), expected);
        assert_eq!(number.to_string(), expected);
    }

    #[rstest::rstest]
    #[case(json!(2.0), 2.0)]
    #[case(json!(1e21), 1e21)]
    #[case(json!(0.1), 0.1)]
    #[case(json!(-1.5e-7), -1.5e-7)]
    fn test_json_numbers_match_number(#[case] json: serde_json::Value, #[case] float: f64) {
        let expected = Number::from(float);
        assert_eq!(text_of(HtmlValue::from(&json)).as_deref(), Some(expected.as_str()));
    }

    #[rstest::rstest]
    fn test_json_values() {
        let null = json!(null);
        let text = json!("a\"b");
        let number = json!(1.5);
        let flag = json!(false);
        let list = json!([1, "two"]);

        assert_eq!(HtmlValue::from(&null).kind(), ValueKind::Null);
        assert_eq!(text_of(HtmlValue::from(&text)).as_deref(), Some("a\"b"));
        assert_eq!(text_of(HtmlValue::from(&number)).as_deref(), Some("1.5"));
        assert_eq!(text_of(HtmlValue::from(&flag)).as_deref(), Some("false"));
        assert_eq!(text_of(HtmlValue::from(&list)).as_deref(), Some("[1,\"two\"]"));
    }

    #[rstest::rstest]
    fn test_debug_does_not_require_debug_values() {
        let helper = HelperResult::new(|w: &mut dyn TextWriter| w.write_str("x"));
        assert_eq!(format!("{:?}", HtmlValue::from(&helper)), "Deferred(..)");
        assert_eq!(format!("{:?}", HtmlValue::from("t")), "Text(\"t\")");
    }
}
