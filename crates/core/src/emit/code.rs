/// Line-oriented source buffer with four-space indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.buf.push_str("    ");
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Write `open`, indent everything written by `body`, then write `close`.
    pub fn block(&mut self, open: impl AsRef<str>, close: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(open);
        self.indent += 1;
        body(self);
        self.indent -= 1;
        self.line(close)
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// A Rust string literal for `value`.
pub fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}
