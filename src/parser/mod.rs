//! Structured-BASIC front end
//!
//! This module turns BASIC source text into C source text:
//! - [`lexer`]: Tokenization (source text → tokens, produced on demand)
//! - [`keywords`]: Prefix tree the lexer uses to separate keywords from identifiers
//! - [`parse`]: The [`Parser`](parse::Parser), which recognizes the grammar and
//!   drives the [`Emitter`](crate::emitter::Emitter) in the same pass
//!
//! # Supported BASIC subset
//!
//! - Statements: `PRINT`, `INPUT`, `LET`, `IF ... THEN ... ENDIF`,
//!   `WHILE ... REPEAT ... ENDWHILE`, `LABEL`, `GOTO`
//! - Expressions: `+ - * /`, unary signs, numbers and variables
//! - Conditions: `== != < <= > >=`
//! - Comments start with `#` and run to the end of the line
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead.

mod expressions;
pub mod keywords;
pub mod lexer;
pub mod parse;
mod statements;
