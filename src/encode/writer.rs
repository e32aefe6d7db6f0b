use crate::{content::TagHelperContent, Charset, Result};

/// Sink the shared render routine writes into.
pub trait TextWriter {
    fn charset(&self) -> Charset;

    fn write_str(&mut self, s: &str) -> Result<()>;

    fn write_char(&mut self, ch: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.write_str(ch.encode_utf8(&mut buf))
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Exposes a [`TagHelperContent`] as a [`TextWriter`] for the length of one borrow.
///
/// Single characters are staged so a run of `write_char` calls lands in the
/// buffer as one chunk. Staged characters are pushed before the next string
/// write, on `flush`, and when the writer is dropped.
///
/// The concatenated text is always what was written, in order, but chunk
/// boundaries are not: three `write_char` calls produce one chunk rather
/// than three. Each `write_str` is still forwarded as its own chunk.
pub struct ContentWriter<'a, C: TagHelperContent + ?Sized> {
    content: &'a mut C,
    charset: Charset,
    pending: String,
}

impl<'a, C: TagHelperContent + ?Sized> ContentWriter<'a, C> {
    pub fn new(content: &'a mut C, charset: Charset) -> Self {
        Self {
            content,
            charset,
            pending: String::new(),
        }
    }

    pub fn content(&self) -> &C {
        &*self.content
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            self.content.append(&self.pending);
            self.pending.clear();
        }
    }
}

impl<C: TagHelperContent + ?Sized> TextWriter for ContentWriter<'_, C> {
    fn charset(&self) -> Charset {
        self.charset
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.flush_pending();
        self.content.append(s);
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> Result<()> {
        self.pending.push(ch);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_pending();
        Ok(())
    }
}

impl<C: TagHelperContent + ?Sized> Drop for ContentWriter<'_, C> {
    fn drop(&mut self) {
        self.flush_pending();
    }
}

/// Writer over an owned `String`.
#[derive(Debug, Default)]
pub struct StringWriter {
    buffer: String,
    charset: Charset,
}

impl StringWriter {
    pub fn new(charset: Charset) -> Self {
        Self {
            buffer: String::new(),
            charset,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

impl TextWriter for StringWriter {
    fn charset(&self) -> Charset {
        self.charset
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.buffer.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> Result<()> {
        self.buffer.push(ch);
        Ok(())
    }
}
