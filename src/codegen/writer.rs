//! Indentation-aware JavaScript source writer.

use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Builds JavaScript source line by line with block structure.
///
/// ```ignore
/// let mut w = JsWriter::new();
/// w.block("init()", |w| {
///     w.line("this.setupEventListeners();");
/// });
/// ```
#[derive(Debug, Default)]
pub struct JsWriter {
    out: String,
    depth: usize,
}

impl JsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.out.push('\n');
            return self;
        }
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Write `// text`.
    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(format!("// {}", text.as_ref()))
    }

    /// Write `header {`, the body one level deeper, then `}`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.block_with_close(header, "}", body)
    }

    /// Like [`Self::block`] with a custom closing line such as `});`.
    pub fn block_with_close(
        &mut self,
        header: impl AsRef<str>,
        close: &str,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line(close)
    }

    /// Write a multi-line literal (such as pretty JSON) after `prefix`.
    ///
    /// Continuation lines are indented to the current depth; `suffix` is
    /// appended to the last line.
    pub fn multiline(&mut self, prefix: &str, literal: &str, suffix: &str) -> &mut Self {
        let mut lines = literal.lines();
        let first = lines.next().unwrap_or_default();
        let mut current = format!("{}{}", prefix, first);
        for next in lines {
            self.line(&current);
            current = next.to_string();
        }
        let _ = write!(current, "{}", suffix);
        self.line(current)
    }

    pub fn finish(self) -> String {
        self.out
    }
}
