//! Lexer (tokenizer) for structured-BASIC source
//!
//! Produces tokens lazily, one per call to [`Lexer::next_token`], so the parser
//! never holds more than its current and lookahead token. Line breaks are
//! significant and come back as [`TokenKind::Newline`]; `#` comments and all
//! other whitespace are dropped. Characters the grammar has no use for are
//! skipped without producing a token.

use super::keywords::KeywordTrie;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Newline,
    Number,
    Ident,
    String,

    // Keywords
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,

    // Operators
    Eq,       // =
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    EqEq,     // ==
    NotEq,    // !=
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
}

impl TokenKind {
    /// Comparison operators accepted between the expressions of a condition.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Number => "NUMBER",
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Label => "LABEL",
            TokenKind::Goto => "GOTO",
            TokenKind::Print => "PRINT",
            TokenKind::Input => "INPUT",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::EndIf => "ENDIF",
            TokenKind::While => "WHILE",
            TokenKind::Repeat => "REPEAT",
            TokenKind::EndWhile => "ENDWHILE",
            TokenKind::Eq => "EQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::EqEq => "EQEQ",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Lt => "LT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTEQ",
        };
        f.pad(name)
    }
}

/// A classified slice of source text.
///
/// `text` is the exact source spelling, except for string literals where it is
/// the content between the quotes. `line` is the 1-based line the token
/// starts on and only feeds diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, line: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Number | TokenKind::Ident => write!(f, "{} '{}'", self.kind, self.text),
            TokenKind::String => write!(f, "STRING \"{}\"", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexical errors. Every one of them ends the translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Two decimal points in one number: '{number}' (line {line})")]
    TwoDecimalPoints { number: String, line: usize },

    #[error("Illegal character in string: {ch:?} (line {line})")]
    IllegalStringChar { ch: char, line: usize },

    #[error("Unterminated string literal (line {line})")]
    UnterminatedString { line: usize },
}

/// Lexer for structured-BASIC source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    keywords: KeywordTrie,
    finished: bool,
}

impl Lexer {
    /// Create a lexer over `source`. A line break is appended so the last
    /// statement is always terminated.
    pub fn new(source: &str) -> Self {
        let mut input: Vec<char> = source.chars().collect();
        input.push('\n');
        Self {
            input,
            position: 0,
            line: 1,
            keywords: KeywordTrie::new(),
            finished: false,
        }
    }

    /// Tokenize the whole input, up to and including the end-of-input token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        self.by_ref().collect()
    }

    /// Produce the next token. Once the input is exhausted every call returns
    /// an end-of-input token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let line = self.line;
            let Some(ch) = self.peek() else {
                return Ok(Token::new("", TokenKind::Eof, line));
            };

            // The newline check has to come before the whitespace skip
            let token = match ch {
                '\n' => {
                    self.advance();
                    Token::new("\n", TokenKind::Newline, line)
                }
                c if c.is_whitespace() => {
                    self.skip_whitespace();
                    continue;
                }
                '#' => {
                    self.skip_comment();
                    continue;
                }
                '=' => self.operator('=', TokenKind::EqEq, TokenKind::Eq, line),
                '<' => self.operator('=', TokenKind::LtEq, TokenKind::Lt, line),
                '>' => self.operator('=', TokenKind::GtEq, TokenKind::Gt, line),
                '!' => {
                    self.advance();
                    if self.peek() != Some('=') {
                        continue;
                    }
                    self.advance();
                    Token::new("!=", TokenKind::NotEq, line)
                }
                '+' => self.single(TokenKind::Plus, line),
                '-' => self.single(TokenKind::Minus, line),
                '*' => self.single(TokenKind::Asterisk, line),
                '/' => self.single(TokenKind::Slash, line),
                '"' => self.string_literal(line)?,
                c if c.is_ascii_digit() => self.number_literal(line)?,
                c if c.is_alphabetic() => self.identifier_or_keyword(line),
                _ => {
                    self.advance();
                    continue;
                }
            };

            trace!(kind = %token.kind, text = ?token.text, line, "token");
            return Ok(token);
        }
    }

    fn single(&mut self, kind: TokenKind, line: usize) -> Token {
        let ch = self.advance().unwrap_or_default();
        Token::new(ch.to_string(), kind, line)
    }

    /// One-character operator, or its two-character form when `second` follows.
    fn operator(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
        line: usize,
    ) -> Token {
        let first = self.advance().unwrap_or_default();
        if self.peek() == Some(second) {
            self.advance();
            Token::new(format!("{}{}", first, second), double, line)
        } else {
            Token::new(first.to_string(), single, line)
        }
    }

    /// Digits with at most one decimal point
    fn number_literal(&mut self, line: usize) -> Result<Token, LexError> {
        let mut number = String::new();
        let mut seen_decimal = false;

        while let Some(ch) = self.peek() {
            if ch == '.' {
                if seen_decimal {
                    number.push(ch);
                    return Err(LexError::TwoDecimalPoints { number, line });
                }
                seen_decimal = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            number.push(ch);
            self.advance();
        }

        Ok(Token::new(number, TokenKind::Number, line))
    }

    /// Parse string literal. The content is copied verbatim; characters that
    /// would change meaning inside a C format string are rejected.
    fn string_literal(&mut self, line: usize) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut string = String::new();

        loop {
            match self.advance() {
                Some('"') => return Ok(Token::new(string, TokenKind::String, line)),
                Some(ch @ ('\r' | '\n' | '\t' | '\\' | '%')) => {
                    return Err(LexError::IllegalStringChar { ch, line });
                }
                Some(ch) => string.push(ch),
                None => return Err(LexError::UnterminatedString { line }),
            }
        }
    }

    fn identifier_or_keyword(&mut self, line: usize) -> Token {
        let mut word = String::new();
        if let Some(first) = self.advance() {
            word.push(first);
        }

        // Extend only while the text read so far can still grow into a keyword
        while let Some(ch) = self.peek() {
            if !ch.is_alphabetic() || !self.keywords.starts_with(&word) {
                break;
            }
            word.push(ch);
            self.advance();
        }

        if let Some(kind) = self.keywords.lookup(&word) {
            return Token::new(word, kind, line);
        }

        while let Some(ch) = self.peek().filter(|c| c.is_alphabetic()) {
            word.push(ch);
            self.advance();
        }

        Token::new(word, TokenKind::Ident, line)
    }

    /// Skip whitespace up to, but not including, the next line break.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' || !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }
}

/// Yields tokens up to and including the end-of-input token, or up to the
/// first error, then stops.
impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.kind == TokenKind::Eof,
            Err(_) => true,
        };
        Some(result)
    }
}
