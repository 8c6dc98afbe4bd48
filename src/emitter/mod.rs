//! Output text accumulator
//!
//! [`Emitter`] collects generated C text in two buffers: a header that is
//! always written first, and the body the parser appends to as it recognizes
//! statements. It knows nothing about the grammar; its only job beyond
//! appending is to keep indentation in step with the parser's block nesting.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// One level of indentation in the generated code
const INDENT: &str = "   ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A block was closed more times than it was opened.
    #[error("Tab depth underflow: block closed without a matching open")]
    TabDepthUnderflow,
}

#[derive(Debug, Default, Clone)]
pub struct Emitter {
    header: String,
    code: String,
    tab_depth: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to the body. Indentation is added only when the body
    /// currently ends a line, so it lands once per physical line no matter
    /// how many pieces that line is emitted in.
    pub fn emit(&mut self, text: &str) {
        if self.code.ends_with('\n') {
            for _ in 0..self.tab_depth {
                self.code.push_str(INDENT);
            }
        }
        self.code.push_str(text);
    }

    /// Append `text` and a line break, without indentation.
    pub fn emit_line(&mut self, text: &str) {
        self.code.push_str(text);
        self.code.push('\n');
    }

    /// Append a bare line break.
    pub fn newline(&mut self) {
        self.code.push('\n');
    }

    pub fn increment_tab_depth(&mut self) {
        self.tab_depth += 1;
    }

    pub fn decrement_tab_depth(&mut self) -> Result<(), EmitError> {
        self.tab_depth = self
            .tab_depth
            .checked_sub(1)
            .ok_or(EmitError::TabDepthUnderflow)?;
        Ok(())
    }

    pub fn tab_depth(&self) -> usize {
        self.tab_depth
    }

    /// Append a line to the header region.
    pub fn header_line(&mut self, text: &str) {
        self.header.push_str(text);
        self.header.push('\n');
    }

    /// The translation: header followed by body.
    pub fn output(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.code.len());
        out.push_str(&self.header);
        out.push_str(&self.code);
        out
    }

    /// Persist [`Emitter::output`] to `path`, replacing any existing file.
    pub fn write(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.output())
    }
}
