//! Expression parsing and emission
//!
//! ```text
//! comparison ::= expression (relop expression)+
//! expression ::= term {('+' | '-') term}
//! term       ::= unary {('*' | '/') unary}
//! unary      ::= ['+' | '-'] primary
//! primary    ::= number | ident
//! ```
//!
//! Operands and operators are emitted in the order they are recognized.
//! Every `expression` is wrapped in parentheses, so the C compiler sees the
//! same grouping the grammar implies.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

impl Parser<'_> {
    /// Two or more expressions joined by comparison operators.
    pub(crate) fn comparison(&mut self) -> Result<(), ParseError> {
        trace!("comparison");
        self.expression()?;

        if !self.cur_token.kind.is_relational() {
            return Err(ParseError::ExpectedComparison {
                found: self.cur_token.to_string(),
                line: self.cur_token.line,
            });
        }

        while self.cur_token.kind.is_relational() {
            let op = self.advance()?;
            self.emitter.emit(&format!(" {} ", op.text));
            self.expression()?;
        }
        Ok(())
    }

    pub(crate) fn expression(&mut self) -> Result<(), ParseError> {
        trace!("expression");
        self.emitter.emit("(");
        self.term()?;

        while self.check_token(TokenKind::Plus) || self.check_token(TokenKind::Minus) {
            let op = self.advance()?;
            self.emitter.emit(&op.text);
            self.term()?;
        }

        self.emitter.emit(")");
        Ok(())
    }

    fn term(&mut self) -> Result<(), ParseError> {
        trace!("term");
        self.unary()?;

        while self.check_token(TokenKind::Asterisk) || self.check_token(TokenKind::Slash) {
            let op = self.advance()?;
            self.emitter.emit(&op.text);
            self.unary()?;
        }
        Ok(())
    }

    fn unary(&mut self) -> Result<(), ParseError> {
        trace!("unary");
        if self.check_token(TokenKind::Plus) || self.check_token(TokenKind::Minus) {
            let sign = self.advance()?;
            self.emitter.emit(&sign.text);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<(), ParseError> {
        trace!(token = %self.cur_token, "primary");
        match self.cur_token.kind {
            TokenKind::Number => {}
            TokenKind::Ident => {
                if !self.symbols.contains(&self.cur_token.text) {
                    return Err(ParseError::UndeclaredVariable(self.cur_token.text.clone()));
                }
            }
            _ => {
                return Err(ParseError::ExpectedPrimary {
                    found: self.cur_token.to_string(),
                    line: self.cur_token.line,
                });
            }
        }

        let operand = self.advance()?;
        self.emitter.emit(&operand.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::ParseError;
    use crate::translate;

    fn assignment(expr: &str) -> Result<String, ParseError> {
        let output = translate(&format!("LET a = 1\nLET b = 2\nLET r = {}\n", expr))?;
        let line = output
            .lines()
            .find(|line| line.trim_start().starts_with("float r = "))
            .unwrap_or_default();
        Ok(line.trim().to_string())
    }

    #[test]
    fn test_operator_order_is_preserved() {
        assert_eq!(assignment("a + b * 3 - 4 / b").unwrap(), "float r = (a+b*3-4/b);");
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(assignment("-a * +2").unwrap(), "float r = (-a*+2);");
    }

    #[test]
    fn test_chained_comparison() {
        let output =
            translate("LET a = 1\nWHILE 0 < a <= 10 REPEAT\nLET a = a + 1\nENDWHILE\n").unwrap();
        assert!(output.contains("while ((0) < (a) <= (10)) {"));
    }

    #[test]
    fn test_comparison_requires_operator() {
        let err = translate("LET a = 1\nIF a THEN\nENDIF\n").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedComparison { line: 2, .. }));
    }

    #[test]
    fn test_missing_operand() {
        let err = assignment("a +").unwrap_err();
        assert_eq!(
            err,
            ParseError::ExpectedPrimary {
                found: "NEWLINE".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn test_undeclared_variable() {
        let err = assignment("a + c").unwrap_err();
        assert_eq!(err, ParseError::UndeclaredVariable("c".to_string()));
    }
}
