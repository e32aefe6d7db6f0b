//! HTML-encoding append for tag helper content buffers.
//!
//! [`append`] writes a value into a [`TagHelperContent`] buffer. Plain values
//! go through an [`HtmlEncoder`] with quotes escaped, [`HtmlString`] markup is
//! written as-is, and deferred helpers ([`WriteTo`]) write themselves straight
//! into the buffer.

pub mod constants;
pub mod content;
pub mod encode;
pub mod error;
pub mod num;
pub mod options;
pub mod render;
pub mod text;
pub mod value;

pub use crate::content::{DefaultTagHelperContent, TagHelperContent};
pub use crate::encode::{
    ContentWriter, DefaultHtmlEncoder, HtmlEncoder, PassThroughEncoder, StringWriter, TextWriter,
};
pub use crate::error::{Error, ErrorKind};
pub use crate::options::{AppendOptions, Charset};
pub use crate::render::{
    append, append_with_options, render_to_string, write_to, TagHelperContentExt,
};
pub use crate::value::{HelperResult, HtmlString, HtmlValue, Number, ValueKind, WriteTo};

pub type Result<T> = std::result::Result<T, Error>;

/// Encode `value` as HTML text with the default encoder and quote escaping.
///
/// # Examples
/// ```
/// assert_eq!(tag_content::encode_html("<a title=\"x\">").unwrap(), "&lt;a title=&quot;x&quot;&gt;");
/// ```
pub fn encode_html(value: &str) -> Result<String> {
    render_to_string(&DefaultHtmlEncoder::new(), value, &AppendOptions::default())
}
