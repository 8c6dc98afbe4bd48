//! Statement parsing and emission
//!
//! # Grammar
//!
//! ```text
//! statement ::= PRINT (expression | string) nl
//!             | IF comparison THEN nl {statement} ENDIF nl
//!             | WHILE comparison REPEAT nl {statement} ENDWHILE nl
//!             | LABEL ident nl
//!             | GOTO ident nl
//!             | LET ident '=' expression nl
//!             | INPUT ident nl
//! nl        ::= NEWLINE+
//! ```
//!
//! Every variable is a C `float`; its declaration is emitted in front of the
//! first `LET` or `INPUT` that names it.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::{debug, trace};

impl Parser<'_> {
    /// Parse one statement, dispatching on its leading keyword.
    pub(crate) fn statement(&mut self) -> Result<(), ParseError> {
        match self.cur_token.kind {
            TokenKind::Print => self.print_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Label => self.label_statement(),
            TokenKind::Goto => self.goto_statement(),
            TokenKind::Let => self.let_statement(),
            TokenKind::Input => self.input_statement(),
            _ => Err(ParseError::ExpectedStatement {
                found: self.cur_token.to_string(),
                line: self.cur_token.line,
            }),
        }
    }

    fn print_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: PRINT");
        self.expect(TokenKind::Print)?;
        self.emitter.emit("printf(");

        if self.check_token(TokenKind::String) {
            let string = self.advance()?;
            self.emitter.emit(&format!("\"{}\"", string.text));
        } else {
            self.emitter.emit("\"%.2f\\n\", ");
            self.expression()?;
        }

        self.emitter.emit(");");
        self.nl()
    }

    fn if_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: IF");
        self.expect(TokenKind::If)?;
        self.emitter.emit("if (");
        self.comparison()?;
        self.emitter.emit(")");

        self.expect(TokenKind::Then)?;
        self.emitter.emit("{");
        self.emitter.increment_tab_depth();
        self.nl()?;

        self.block(TokenKind::EndIf)?;

        self.expect(TokenKind::EndIf)?;
        self.emitter.decrement_tab_depth()?;
        self.emitter.emit("}");
        self.nl()
    }

    fn while_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: WHILE");
        self.expect(TokenKind::While)?;
        self.emitter.emit("while (");
        self.comparison()?;
        self.emitter.emit(") ");

        self.expect(TokenKind::Repeat)?;
        self.emitter.emit("{");
        self.emitter.increment_tab_depth();
        self.nl()?;

        self.block(TokenKind::EndWhile)?;

        self.expect(TokenKind::EndWhile)?;
        self.emitter.decrement_tab_depth()?;
        self.emitter.emit("}");
        self.nl()
    }

    /// Statements up to (not including) the `end` keyword.
    fn block(&mut self, end: TokenKind) -> Result<(), ParseError> {
        while !self.check_token(end) {
            if self.check_token(TokenKind::Eof) {
                return Err(self.unexpected(end));
            }
            self.statement()?;
        }
        Ok(())
    }

    fn label_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: LABEL");
        self.expect(TokenKind::Label)?;
        let label = self.expect(TokenKind::Ident)?.text;

        // Repeating a label is accepted; the C compiler sees both copies
        self.labels_declared.insert(label.clone());
        debug!(%label, "label declared");

        self.emitter.emit(&format!("{}:", label));
        self.nl()
    }

    fn goto_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: GOTO");
        self.expect(TokenKind::Goto)?;
        let label = self.expect(TokenKind::Ident)?.text;

        self.emitter.emit(&format!("goto {};", label));
        self.labels_gotoed.push(label);
        self.nl()
    }

    fn let_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: LET");
        self.expect(TokenKind::Let)?;
        let name = self.expect(TokenKind::Ident)?.text;

        // Declared before the right-hand side is read
        if self.symbols.insert(name.clone()) {
            debug!(%name, "variable declared by LET");
            self.emitter.emit("float ");
        }
        self.emitter.emit(&name);

        self.expect(TokenKind::Eq)?;
        self.emitter.emit(" = ");
        self.expression()?;
        self.emitter.emit(";");
        self.nl()
    }

    fn input_statement(&mut self) -> Result<(), ParseError> {
        trace!("statement: INPUT");
        self.expect(TokenKind::Input)?;
        let name = self.expect(TokenKind::Ident)?.text;

        if self.symbols.insert(name.clone()) {
            debug!(%name, "variable declared by INPUT");
            self.emitter.emit(&format!("float {};\n", name));
        }
        self.emitter.emit(&format!("scanf(\"%f\", &{});", name));
        self.nl()
    }

    /// One or more line breaks. Each is copied to the output, so blank source
    /// lines survive into the generated code.
    pub(crate) fn nl(&mut self) -> Result<(), ParseError> {
        trace!("newline");
        if !self.check_token(TokenKind::Newline) {
            return Err(self.unexpected(TokenKind::Newline));
        }
        while self.check_token(TokenKind::Newline) {
            self.emitter.emit("\n");
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::translate;

    fn body(source: &str) -> String {
        let output = translate(source).unwrap();
        let start = output.find("int main() {\n").unwrap() + "int main() {\n".len();
        output[start..].to_string()
    }

    #[test]
    fn test_print_string_is_quoted_verbatim() {
        assert_eq!(body("PRINT \"hi there\"\n"), "   printf(\"hi there\");\n   \n\n}");
    }

    #[test]
    fn test_let_declares_once() {
        assert_eq!(
            body("LET a = 1\nLET a = 2\n"),
            "   float a = (1);\n   a = (2);\n   \n\n}"
        );
    }

    #[test]
    fn test_input_declares_then_reads() {
        assert_eq!(
            body("INPUT n\nINPUT n\n"),
            "   float n;\n   scanf(\"%f\", &n);\n   scanf(\"%f\", &n);\n   \n\n}"
        );
    }

    #[test]
    fn test_label_and_goto() {
        assert_eq!(body("LABEL top\nGOTO top\n"), "   top:\n   goto top;\n   \n\n}");
    }

    #[test]
    fn test_if_block_indents() {
        assert_eq!(
            body("LET a = 1\nIF a > 0 THEN\nPRINT a\nENDIF\n"),
            "   float a = (1);\n   if ((a) > (0)){\n      printf(\"%.2f\\n\", (a));\n   }\n   \n\n}"
        );
    }
}
