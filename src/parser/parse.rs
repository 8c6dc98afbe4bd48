//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its error type, the token
//! cursor helpers and the `program` entry point.
//!
//! # Parser Architecture
//!
//! Recognition and code generation happen in a single pass: each grammar rule
//! checks its tokens and immediately appends the matching C text to the
//! [`Emitter`]. There is no syntax tree.
//! - This module: Parser struct, helper methods, and the `program` rule
//! - `statements`: one method per statement kind, plus the `nl` rule
//! - `expressions`: `comparison`, `expression`, `term`, `unary`, `primary`
//!
//! Parser methods are split across these files using `impl Parser` blocks.

use crate::emitter::{EmitError, Emitter};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use rustc_hash::FxHashSet;
use std::mem;
use thiserror::Error;
use tracing::{debug, trace};

/// Anything that stops a translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("Expected {expected} token, found {found} on line {line}")]
    UnexpectedToken {
        expected: TokenKind,
        found: String,
        line: usize,
    },

    #[error(
        "Expected a statement (PRINT, IF, WHILE, LABEL, GOTO, LET or INPUT), found {found} on line {line}"
    )]
    ExpectedStatement { found: String, line: usize },

    #[error("Expected number or ident token, found {found} on line {line}")]
    ExpectedPrimary { found: String, line: usize },

    #[error("Expected comparison operator, found {found} on line {line}")]
    ExpectedComparison { found: String, line: usize },

    #[error("Referencing variable before assignment: {0}")]
    UndeclaredVariable(String),

    #[error("Attempting to GOTO to undeclared label: {0}")]
    UndeclaredLabel(String),
}

impl ParseError {
    /// The message reported to the user: lexical and internal failures use
    /// the `ERROR:` prefix, grammar and semantic failures use `Error.`.
    pub fn diagnostic(&self) -> String {
        match self {
            ParseError::Lex(_) | ParseError::Emit(_) => format!("ERROR: {}", self),
            _ => format!("Error. {}", self),
        }
    }
}

/// Recursive descent parser that emits C as it goes.
///
/// Holds the current token and one token of lookahead, pulled lazily from the
/// [`Lexer`]. Symbol and label tables live here, so each translation starts
/// from a clean slate.
pub struct Parser<'a> {
    lexer: Lexer,
    pub(crate) emitter: &'a mut Emitter,
    pub(crate) cur_token: Token,
    peek_token: Token,
    /// Variables assigned or read so far
    pub(crate) symbols: FxHashSet<String>,
    pub(crate) labels_declared: FxHashSet<String>,
    /// GOTO targets in source order, checked once the whole program is read
    pub(crate) labels_gotoed: Vec<String>,
}

impl<'a> Parser<'a> {
    /// Create a parser and prime the current and lookahead tokens.
    pub fn new(mut lexer: Lexer, emitter: &'a mut Emitter) -> Result<Self, ParseError> {
        let cur_token = lexer.next_token()?;
        let peek_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            emitter,
            cur_token,
            peek_token,
            symbols: FxHashSet::default(),
            labels_declared: FxHashSet::default(),
            labels_gotoed: Vec::new(),
        })
    }

    /// Parse the entire program, emitting the translation into the emitter.
    ///
    /// Consumes the parser: a program is recognized exactly once. On error the
    /// emitter holds partial output that must be discarded.
    pub fn program(mut self) -> Result<(), ParseError> {
        trace!("program");

        self.emitter.header_line("#include <stdio.h>");
        self.emitter.header_line("");
        self.emitter.emit_line("int main() {");
        self.emitter.increment_tab_depth();

        loop {
            // Blank lines ahead of a statement are kept for readability
            while self.check_token(TokenKind::Newline) {
                self.emitter.newline();
                self.advance()?;
            }
            if self.check_token(TokenKind::Eof) {
                break;
            }
            self.statement()?;
        }

        self.check_labels()?;

        self.emitter.decrement_tab_depth()?;
        self.emitter.emit("\n}");

        debug!(
            variables = self.symbols.len(),
            labels = self.labels_declared.len(),
            gotos = self.labels_gotoed.len(),
            "program translated"
        );
        Ok(())
    }

    /// Every GOTO target must be declared somewhere in the program.
    fn check_labels(&self) -> Result<(), ParseError> {
        match self
            .labels_gotoed
            .iter()
            .find(|label| !self.labels_declared.contains(*label))
        {
            Some(label) => Err(ParseError::UndeclaredLabel(label.clone())),
            None => Ok(()),
        }
    }

    // ===== Helper methods =====

    pub(crate) fn check_token(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    /// Move to the next token, returning the one just left behind.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        let peek = mem::replace(&mut self.peek_token, next);
        Ok(mem::replace(&mut self.cur_token, peek))
    }

    /// Consume the current token if it is `kind`, otherwise fail.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if !self.check_token(kind) {
            return Err(self.unexpected(kind));
        }
        self.advance()
    }

    pub(crate) fn unexpected(&self, expected: TokenKind) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.cur_token.to_string(),
            line: self.cur_token.line,
        }
    }
}
