use std::fmt;

use smallvec::SmallVec;
use smol_str::SmolStr;

/// Append-only, ordered text accumulator that tag helpers render into.
pub trait TagHelperContent {
    fn append(&mut self, text: &str);
}

impl TagHelperContent for String {
    fn append(&mut self, text: &str) {
        self.push_str(text);
    }
}

/// Chunked content buffer.
///
/// Chunks are kept as appended; `content()` concatenates them. Most tag
/// helper bodies are a handful of chunks, so the first few live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultTagHelperContent {
    chunks: SmallVec<[SmolStr; 4]>,
    modified: bool,
}

impl DefaultTagHelperContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything appended so far with `text`.
    pub fn set_content(&mut self, text: &str) -> &mut Self {
        self.clear();
        self.append(text);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.chunks.clear();
        self.modified = true;
        self
    }

    pub fn content(&self) -> String {
        let len = self.chunks.iter().map(SmolStr::len).sum();
        let mut out = String::with_capacity(len);
        for chunk in &self.chunks {
            out.push_str(chunk);
        }
        out
    }

    pub fn chunks(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(SmolStr::as_str)
    }

    /// True once any append, `set_content` or `clear` has happened.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn is_whitespace(&self) -> bool {
        self.chunks
            .iter()
            .all(|chunk| chunk.chars().all(char::is_whitespace))
    }
}

impl TagHelperContent for DefaultTagHelperContent {
    fn append(&mut self, text: &str) {
        self.modified = true;
        if !text.is_empty() {
            self.chunks.push(SmolStr::new(text));
        }
    }
}

impl fmt::Display for DefaultTagHelperContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
