use super::*;

/// Binding powers for the Pratt expression parser, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    Assignment,
    Equality,
    Comparison,
    Term,
    Factor,
    Call,
}

impl Precedence {
    fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Assign => Precedence::Assignment,
            TokenKind::Eq => Precedence::Equality,
            TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Lte
            | TokenKind::Gte
            | TokenKind::In => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Term,
            TokenKind::Star | TokenKind::Slash => Precedence::Factor,
            TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
            _ => Precedence::None,
        }
    }
}

impl Parser {
    /// Pratt engine: dispatch the leading token to a prefix form, then fold
    /// in infix operators while they bind tighter than the calling context.
    pub fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        let prefix = self.advance().clone();

        let mut left = match prefix.kind {
            TokenKind::Identifier => Expr::Variable(prefix),
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::Str
            | TokenKind::True
            | TokenKind::False => Expr::Literal(prefix),
            TokenKind::LParen => self.grouping()?,
            TokenKind::LBracket => self.array_literal(prefix)?,
            TokenKind::New => self.new_object()?,
            TokenKind::Minus => self.unary_minus(prefix)?,
            _ => return Err(self.error_at(&prefix, "Expected expression.")),
        };

        while precedence < Precedence::of(self.current().kind) {
            let op = self.advance().clone();
            left = match op.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Eq
                | TokenKind::Gt
                | TokenKind::Gte
                | TokenKind::Lt
                | TokenKind::Lte
                | TokenKind::In => self.binary(left, op)?,
                TokenKind::LParen => self.finish_call(left, op)?,
                TokenKind::Dot => {
                    let name =
                        self.expect(TokenKind::Identifier, "Expected property name after '.'.")?;
                    Expr::Get {
                        object: Box::new(left),
                        name,
                    }
                }
                TokenKind::LBracket => self.subscript(left, op)?,
                TokenKind::Assign => self.assignment(left, op)?,
                _ => return Ok(left),
            };
        }

        Ok(left)
    }

    // -------------------------------------------------------------------------
    // Prefix forms
    // -------------------------------------------------------------------------

    fn grouping(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression(Precedence::None)?;
        self.expect(TokenKind::RParen, "Expected ')' after expression.")?;
        Ok(expr)
    }

    fn array_literal(&mut self, bracket: Token) -> Result<Expr, ParseError> {
        let mut elements = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression(Precedence::None)?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RBracket, "Expected ']' after array elements.")?;
        Ok(Expr::ArrayLit { bracket, elements })
    }

    fn new_object(&mut self) -> Result<Expr, ParseError> {
        let class_name = self.expect(TokenKind::Identifier, "Expected class name after 'new'.")?;
        self.expect(TokenKind::LParen, "Expected '(' after class name.")?;
        let args = self.arguments()?;
        self.expect(TokenKind::RParen, "Expected ')' after arguments.")?;
        Ok(Expr::New { class_name, args })
    }

    /// `-x` desugars to `0 - x`, with the operand parsed at Call precedence
    /// so the minus binds tighter than any binary operator.
    fn unary_minus(&mut self, op: Token) -> Result<Expr, ParseError> {
        let zero = Token {
            kind: TokenKind::Integer,
            lexeme: "0".to_string(),
            line: op.line,
            column: op.column,
            length: op.length,
        };
        let right = self.parse_expression(Precedence::Call)?;
        Ok(Expr::Binary {
            left: Box::new(Expr::Literal(zero)),
            op,
            right: Box::new(right),
        })
    }

    // -------------------------------------------------------------------------
    // Infix forms
    // -------------------------------------------------------------------------

    /// The right-hand side is parsed at the operator's own level: under the
    /// strict `<` infix loop an equal-precedence operator to the right does
    /// not fold in, which makes these operators left-associative, while
    /// tighter operators still do.
    fn binary(&mut self, left: Expr, op: Token) -> Result<Expr, ParseError> {
        let right = self.parse_expression(Precedence::of(op.kind))?;
        Ok(Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn finish_call(&mut self, callee: Expr, paren: Token) -> Result<Expr, ParseError> {
        let args = self.arguments()?;
        self.expect(TokenKind::RParen, "Expected ')' after arguments.")?;
        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            args,
        })
    }

    fn subscript(&mut self, array: Expr, bracket: Token) -> Result<Expr, ParseError> {
        let index = self.parse_expression(Precedence::None)?;
        self.expect(TokenKind::RBracket, "Expected ']' after index.")?;
        Ok(Expr::ArrayAccess {
            array: Box::new(array),
            bracket,
            index: Box::new(index),
        })
    }

    /// Right-associative: the value side restarts at the bottom precedence,
    /// so `a = b = c` groups as `a = (b = c)`.
    fn assignment(&mut self, target: Expr, op: Token) -> Result<Expr, ParseError> {
        let value = self.parse_expression(Precedence::None)?;

        match target {
            Expr::Variable(_) | Expr::Get { .. } | Expr::ArrayAccess { .. } => Ok(Expr::Assign {
                target: Box::new(target),
                value: Box::new(value),
            }),
            _ => Err(self.error_at(&op, "Invalid assignment target.")),
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression(Precedence::None)?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(args)
    }
}
