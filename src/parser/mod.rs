use std::rc::Rc;

use thiserror::Error;

use crate::ast::{Expr, FunctionStmt, Stmt};
use crate::lexer::{Token, TokenKind};

mod expr;
mod stmt;

pub use expr::Precedence;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parse the whole token stream, stopping at the first error.
    pub fn parse(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        Ok(statements)
    }

    /// Recovery mode: on an error, drop the failed declaration, skip to the
    /// next safe resumption point, and keep going. Used by hosts that report
    /// diagnostics without terminating, such as the REPL.
    pub fn parse_with_recovery(&mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    errors.push(e);
                    self.synchronize();
                }
            }
        }
        (statements, errors)
    }

    // -------------------------------------------------------------------------
    // Token navigation
    // -------------------------------------------------------------------------

    pub(super) fn current(&self) -> &Token {
        if self.current < self.tokens.len() {
            &self.tokens[self.current]
        } else {
            self.tokens.last().expect("token stream ends with EOF")
        }
    }

    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(super) fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at(self.current(), message))
        }
    }

    pub(super) fn error_at(&self, token: &Token, message: impl Into<String>) -> ParseError {
        let mut message = message.into();
        if token.kind == TokenKind::Eof {
            message.push_str(" at end");
        }
        ParseError {
            message,
            line: token.line,
            column: token.column,
            length: token.length.max(1),
        }
    }

    /// Skip tokens until just past an END or just before the start of a new
    /// top-level construct, so one error does not cascade.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::End {
                return;
            }

            match self.current().kind {
                TokenKind::Class
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {}
            }

            self.advance();
        }
    }
}
