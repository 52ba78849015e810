use super::*;

impl Parser {
    /// Top-level dispatch: class and function declarations, else a statement.
    pub(super) fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.matches(TokenKind::Class) {
            return self.class_declaration();
        }
        if self.matches(TokenKind::Function) {
            let function = self.function_declaration()?;
            return Ok(Stmt::Function(function));
        }
        self.statement()
    }

    /// `CLASS name (INHERITS super)? (ATTRIBUTES :? attr*)? (METHODS :? fn*)? END name`
    fn class_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect(TokenKind::Identifier, "Expected class name.")?;

        let superclass = if self.matches(TokenKind::Inherits) {
            Some(self.expect(TokenKind::Identifier, "Expected superclass name.")?)
        } else {
            None
        };

        if self.matches(TokenKind::Attributes) {
            if self.check(TokenKind::Colon) {
                self.advance();
            }
            // Attribute names produce no AST: fields spring into existence on
            // first assignment at run time. A declared default is parsed and
            // discarded.
            while !self.check(TokenKind::Methods)
                && !self.check(TokenKind::End)
                && !self.is_at_end()
            {
                self.expect(TokenKind::Identifier, "Expected attribute name.")?;
                if self.matches(TokenKind::Assign) {
                    self.parse_expression(Precedence::None)?;
                }
            }
        }

        let mut methods = Vec::new();
        if self.matches(TokenKind::Methods) {
            if self.check(TokenKind::Colon) {
                self.advance();
            }
            while !self.check(TokenKind::End) && !self.is_at_end() {
                self.expect(TokenKind::Function, "Expected 'FUNCTION' keyword.")?;
                methods.push(self.function_declaration()?);
            }
        }

        self.expect(TokenKind::End, "Expected 'END' after class body.")?;
        let end_name = self.expect(TokenKind::Identifier, "Expected class name after 'END'.")?;
        if end_name.lexeme != name.lexeme {
            return Err(self.error_at(
                &end_name,
                "Class name after 'END' does not match class declaration.",
            ));
        }

        Ok(Stmt::Class {
            name,
            superclass,
            methods,
        })
    }

    /// `FUNCTION name ( param, … ) stmt* END name` — the FUNCTION keyword has
    /// already been consumed by the caller.
    fn function_declaration(&mut self) -> Result<Rc<FunctionStmt>, ParseError> {
        let name = self.expect(TokenKind::Identifier, "Expected function name.")?;
        self.expect(TokenKind::LParen, "Expected '('.")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                params.push(self.expect(TokenKind::Identifier, "Expected parameter name.")?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "Expected ')'.")?;

        let body = self.block()?;

        self.expect(TokenKind::End, "Expected 'END' after function body.")?;
        let end_name =
            self.expect(TokenKind::Identifier, "Expected function name after 'END'.")?;
        if end_name.lexeme != name.lexeme {
            return Err(self.error_at(
                &end_name,
                "Function name after 'END' does not match function declaration.",
            ));
        }

        Ok(Rc::new(FunctionStmt { name, params, body }))
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.matches(TokenKind::Return) {
            return self.return_statement();
        }
        if self.matches(TokenKind::Print) {
            return self.print_statement();
        }
        if self.matches(TokenKind::While) {
            return self.while_statement();
        }
        if self.matches(TokenKind::If) {
            return self.if_statement();
        }

        let expr = self.parse_expression(Precedence::None)?;
        Ok(Stmt::Expression(expr))
    }

    /// `IF condition THEN stmt* (ELSE stmt*)? END IF`
    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression(Precedence::None)?;
        self.expect(TokenKind::Then, "Expected 'THEN' after if condition.")?;

        let mut then_branch = Vec::new();
        let mut else_branch = Vec::new();

        while !self.check(TokenKind::Else) && !self.check(TokenKind::End) && !self.is_at_end() {
            then_branch.push(self.declaration()?);
        }

        if self.matches(TokenKind::Else) {
            while !self.check(TokenKind::End) && !self.is_at_end() {
                else_branch.push(self.declaration()?);
            }
        }

        self.expect(TokenKind::End, "Expected 'END' after if.")?;
        self.expect(TokenKind::If, "Expected 'IF' after 'END'.")?;

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `WHILE condition stmt* END WHILE`
    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression(Precedence::None)?;
        let body = self.block()?;
        self.expect(TokenKind::End, "Expected 'END' after while loop.")?;
        self.expect(TokenKind::While, "Expected 'WHILE' after 'END'.")?;
        Ok(Stmt::While { condition, body })
    }

    /// `PRINT ( expression )`
    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LParen, "Expected '(' after PRINT.")?;
        let expr = self.parse_expression(Precedence::None)?;
        self.expect(TokenKind::RParen, "Expected ')' after PRINT argument.")?;
        Ok(Stmt::Print(expr))
    }

    /// `RETURN expression?` — the value is absent when the next token closes
    /// the enclosing block.
    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = if self.check(TokenKind::End) || self.check(TokenKind::Else) {
            None
        } else {
            Some(self.parse_expression(Precedence::None)?)
        };
        Ok(Stmt::Return(value))
    }

    /// Statements up to a block terminator: END, ELSE, or end of input.
    /// Blocks accept declarations too, so functions can nest and close over
    /// the enclosing frame.
    fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::End) && !self.check(TokenKind::Else) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        Ok(statements)
    }
}
