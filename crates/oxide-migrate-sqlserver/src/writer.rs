//! Indentation-aware SQL text builder.

/// Text appended once per indent level at the start of a line.
pub const INDENT: &str = "    ";

/// Builds SQL text, indenting each new line to the current nesting level.
///
/// Indentation is written lazily, right before the first non-empty text on a
/// line, so blank lines carry no trailing spaces.
#[derive(Debug)]
pub struct IndentedWriter {
    buffer: String,
    indent: usize,
    at_line_start: bool,
}

impl IndentedWriter {
    /// Creates an empty writer at indent level 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    /// Increases the indent level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decreases the indent level, stopping at 0.
    pub fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Returns the current indent level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.indent
    }

    /// Appends text.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.buffer.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.buffer.push_str(text);
    }

    /// Appends text followed by a line break.
    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    /// Appends a line break.
    pub fn new_line(&mut self) {
        self.write_line("");
    }

    /// Consumes the writer and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for IndentedWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indents_only_at_line_start() {
        let mut w = IndentedWriter::new();
        w.write_line("IF x IS NULL");
        w.indent();
        w.write("EXECUTE(");
        w.write("'y')");
        w.outdent();
        assert_eq!(w.into_string(), "IF x IS NULL\n    EXECUTE('y')");
    }

    #[test]
    fn test_nested_indent() {
        let mut w = IndentedWriter::new();
        w.indent();
        w.write_line("a");
        w.indent();
        w.write_line("b");
        w.outdent();
        w.outdent();
        w.write("c");
        assert_eq!(w.level(), 0);
        assert_eq!(w.into_string(), "    a\n        b\nc");
    }

    #[test]
    fn test_blank_lines_have_no_indent() {
        let mut w = IndentedWriter::new();
        w.indent();
        w.new_line();
        w.write("x");
        assert_eq!(w.into_string(), "\n    x");
    }

    #[test]
    fn test_outdent_saturates() {
        let mut w = IndentedWriter::new();
        w.outdent();
        assert_eq!(w.level(), 0);
    }
}
