//! # Introduction
//!
//! bastoc translates programs written in a small structured BASIC into C.
//! Every variable becomes a `float`, `PRINT` and `INPUT` map onto `printf` and
//! `scanf`, and the whole program becomes the body of `main`.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Lexer → Parser ⇄ Emitter → C source
//! ```
//!
//! 1. [`parser::lexer`]: produces tokens on demand.
//! 2. [`parser::parse`]: recursive descent over the grammar; each rule emits
//!    its C text as soon as it is recognized, so there is no syntax tree.
//! 3. [`emitter`]: header and body buffers with indentation tracking.
//!
//! Translation is fail-fast: the first lexical, grammar or semantic error
//! ends it, and any partial output is discarded.
//!
//! ```
//! let c = bastoc::translate("LET x = 5\nPRINT x\n").unwrap();
//! assert!(c.contains("float x = (5);"));
//! ```

pub mod emitter;
pub mod parser;

use emitter::Emitter;
use parser::lexer::Lexer;
use parser::parse::{ParseError, Parser};

/// Translate a whole BASIC program to C source text.
pub fn translate(source: &str) -> Result<String, ParseError> {
    let mut emitter = Emitter::new();
    Parser::new(Lexer::new(source), &mut emitter)?.program()?;
    Ok(emitter.output())
}
