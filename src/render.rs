use crate::{
    content::TagHelperContent,
    encode::{ContentWriter, HtmlEncoder, StringWriter, TextWriter},
    text::string::escape_quotes,
    value::display_to_string,
    AppendOptions, Charset, HtmlValue, Result,
};

/// Write `value` to `writer`, HTML-encoding it unless it is pre-escaped
/// markup or a deferred helper.
///
/// With `escape_quotes`, any `"` left in the encoder's output is written as
/// `&quot;`. Pre-escaped markup and helper output are written verbatim.
/// `HtmlValue::Null` and empty text write nothing.
pub fn write_to(
    writer: &mut dyn TextWriter,
    encoder: &dyn HtmlEncoder,
    value: HtmlValue<'_>,
    escape_quotes_enabled: bool,
) -> Result<()> {
    match value {
        HtmlValue::Null => Ok(()),
        HtmlValue::Raw(markup) => {
            if markup.is_empty() {
                return Ok(());
            }
            writer.write_str(markup.as_str())
        }
        HtmlValue::Deferred(helper) => helper.write_to(writer),
        HtmlValue::Text(text) => write_encoded(writer, encoder, &text, escape_quotes_enabled),
        HtmlValue::Display(value) => {
            let text = display_to_string(value)?;
            write_encoded(writer, encoder, &text, escape_quotes_enabled)
        }
    }
}

fn write_encoded(
    writer: &mut dyn TextWriter,
    encoder: &dyn HtmlEncoder,
    text: &str,
    escape_quotes_enabled: bool,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let encoded = encoder.encode(text)?;
    if escape_quotes_enabled {
        writer.write_str(&escape_quotes(&encoded))
    } else {
        writer.write_str(&encoded)
    }
}

/// Append `value` to `content`, encoded, and hand `content` back for chaining.
///
/// The buffer is exposed to [`write_to`] through a [`ContentWriter`] that
/// lives only for this call; quote escaping is always on. Errors from the
/// encoder or a deferred helper are returned as-is, and whatever was written
/// before the failure stays in `content`.
///
/// # Examples
/// ```
/// use tag_content::{append, Charset, DefaultHtmlEncoder, HtmlString};
///
/// let encoder = DefaultHtmlEncoder::new();
/// let bold = HtmlString::new("<b>");
/// let mut out = String::new();
///
/// append(&mut out, &encoder, Charset::Utf8, "1 < 2")?;
/// append(&mut out, &encoder, Charset::Utf8, &bold)?;
/// assert_eq!(out, "1 &lt; 2<b>");
/// # Ok::<(), tag_content::Error>(())
/// ```
pub fn append<'c, 'v, C>(
    content: &'c mut C,
    encoder: &dyn HtmlEncoder,
    charset: Charset,
    value: impl Into<HtmlValue<'v>>,
) -> Result<&'c mut C>
where
    C: TagHelperContent + ?Sized,
{
    let options = AppendOptions::new().with_charset(charset);
    append_with_options(content, encoder, value, &options)
}

/// [`append`] with the charset and quote escaping taken from `options`.
pub fn append_with_options<'c, 'v, C>(
    content: &'c mut C,
    encoder: &dyn HtmlEncoder,
    value: impl Into<HtmlValue<'v>>,
    options: &AppendOptions,
) -> Result<&'c mut C>
where
    C: TagHelperContent + ?Sized,
{
    let value = value.into();
    tracing::trace!(
        kind = value.kind().as_str(),
        charset = %options.charset,
        escape_quotes = options.escape_quotes,
        "appending to tag helper content"
    );
    {
        let mut writer = ContentWriter::new(&mut *content, options.charset);
        if let Err(err) = write_to(&mut writer, encoder, value, options.escape_quotes) {
            tracing::debug!(kind = err.kind.as_str(), error = %err, "append failed");
            return Err(err);
        }
    }
    Ok(content)
}

/// Method form of [`append`].
pub trait TagHelperContentExt: TagHelperContent {
    fn append_encoded<'v>(
        &mut self,
        encoder: &dyn HtmlEncoder,
        charset: Charset,
        value: impl Into<HtmlValue<'v>>,
    ) -> Result<&mut Self> {
        append(self, encoder, charset, value)
    }
}

impl<T: TagHelperContent + ?Sized> TagHelperContentExt for T {}

/// Render `value` into a fresh string.
pub fn render_to_string<'v>(
    encoder: &dyn HtmlEncoder,
    value: impl Into<HtmlValue<'v>>,
    options: &AppendOptions,
) -> Result<String> {
    let mut writer = StringWriter::new(options.charset);
    write_to(&mut writer, encoder, value.into(), options.escape_quotes)?;
    Ok(writer.finish())
}
