//! Line-preserving text documents.

use std::fmt;

/// A text file as an ordered sequence of lines.
///
/// Each line keeps its own terminator (`\n` or `\r\n`), and the last line
/// may have none, so concatenating the lines reproduces the input exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    lines: Vec<String>,
}

impl SourceDocument {
    /// Split text into lines, keeping line terminators.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub(crate) fn extend_from(&mut self, lines: &[String]) {
        self.lines.extend_from_slice(lines);
    }

    /// Join the lines back into the full text.
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

impl fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}
