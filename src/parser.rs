// ═══════════════════════════════════════════════════════════
// Frenchy Parser: turns tokens into AST
// ═══════════════════════════════════════════════════════════

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::{Span, Token, TokenWithSpan};

pub struct Parser {
    tokens: Vec<TokenWithSpan>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithSpan>) -> Self {
        Parser { tokens, pos: 0 }
    }

    // ── Token navigation ──────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn peek2(&self) -> &Token {
        self.tokens.get(self.pos + 1).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn span(&self) -> Span {
        self.tokens.get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or(Span { line: 1, col: 1 })
    }

    fn advance(&mut self) -> Token {
        let t = self.peek().clone();
        if self.pos + 1 < self.tokens.len() { self.pos += 1; }
        t
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let span = self.span();
        SyntaxError::new(message, span.line, span.col)
    }

    fn expect(&mut self, expected: &Token) -> Result<(), SyntaxError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("Expected {:?}, got {:?}", expected, self.peek())))
        }
    }

    fn check(&self, t: &Token) -> bool { self.peek() == t }

    fn eat(&mut self, t: &Token) -> bool {
        if self.peek() == t { self.advance(); true } else { false }
    }

    fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        match self.peek().clone() {
            Token::Ident(s) => { self.advance(); Ok(s) }
            other => Err(self.error(format!("Expected identifier, got {:?}", other))),
        }
    }

    // ── Top-level parsing ─────────────────────────────────────────────────────

    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, SyntaxError> {
        let mut stmts = Vec::new();
        while !self.check(&Token::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    // ── Statements ────────────────────────────────────────────────────────────

    fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let stmt = match self.peek().clone() {
            Token::Si      => Stmt::If(self.parse_if()?),
            Token::Pendant => {
                self.advance();
                self.expect(&Token::Que)?;
                self.parse_while(Polarity::WhileTrue)?
            }
            Token::Jusqua  => {
                self.advance();
                self.parse_while(Polarity::WhileFalse)?
            }
            Token::Pour    => self.parse_for()?,
            Token::LBrace  => Stmt::Block(self.parse_block()?),
            Token::Ident(name) => match self.peek2().clone() {
                Token::Eq => Stmt::Assign(self.parse_assignment()?),
                Token::LParen => {
                    self.advance();
                    Stmt::Expr(self.parse_call(name)?)
                }
                other => return Err(self.error(format!(
                    "Expected '=' or '(' after '{}', got {:?}", name, other
                ))),
            },
            other => return Err(self.error(format!("Unexpected token at statement start: {:?}", other))),
        };
        self.eat(&Token::Semicolon);
        Ok(stmt)
    }

    fn parse_assignment(&mut self) -> Result<Assignment, SyntaxError> {
        let name = self.expect_ident()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { name, value })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, SyntaxError> {
        self.expect(&Token::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&Token::RBrace) && !self.check(&Token::Eof) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&Token::RBrace)?;
        Ok(stmts)
    }

    fn parse_if(&mut self) -> Result<IfBlock, SyntaxError> {
        self.expect(&Token::Si)?;
        let condition = self.parse_expr()?;
        let then_block = self.parse_block()?;

        let otherwise = if self.eat(&Token::Sinon) {
            if self.check(&Token::Si) {
                Some(ElseBranch::ElseIf(Box::new(self.parse_if()?)))
            } else {
                Some(ElseBranch::Else(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfBlock { condition, then_block, otherwise })
    }

    fn parse_while(&mut self, polarity: Polarity) -> Result<Stmt, SyntaxError> {
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { polarity, condition, body })
    }

    fn parse_for(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(&Token::Pour)?;
        if self.eat(&Token::Chaque) {
            return self.parse_foreach();
        }
        self.expect(&Token::LParen)?;
        let init = self.parse_assignment()?;
        self.expect(&Token::Semicolon)?;
        let stop = self.parse_expr()?;
        self.expect(&Token::Semicolon)?;
        let step = self.parse_assignment()?;
        self.expect(&Token::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::For { init, stop, step, body })
    }

    fn parse_foreach(&mut self) -> Result<Stmt, SyntaxError> {
        self.expect(&Token::LParen)?;
        let element = self.parse_type()?;
        let variable = self.expect_ident()?;
        self.expect(&Token::Dans)?;
        let list = self.expect_ident()?;
        self.expect(&Token::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::ForEach { element, variable, list, body })
    }

    // ── Types ─────────────────────────────────────────────────────────────────

    fn parse_type(&mut self) -> Result<ElementType, SyntaxError> {
        match self.peek_type() {
            Some(ty) => { self.advance(); Ok(ty) }
            None => Err(self.error(format!("Expected type, got {:?}", self.peek()))),
        }
    }

    fn peek_type(&self) -> Option<ElementType> {
        match self.peek() {
            Token::EntierType   => Some(ElementType::Integer),
            Token::FlottantType => Some(ElementType::Float),
            Token::TexteType    => Some(ElementType::Text),
            Token::BooleenType  => Some(ElementType::Boolean),
            _ => None,
        }
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    pub fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_addition()?;
        loop {
            let op = match self.peek() {
                Token::EqEq  => BinOp::Eq,
                Token::NotEq => BinOp::NotEq,
                Token::Lt    => BinOp::Lt,
                Token::LtEq  => BinOp::LtEq,
                Token::Gt    => BinOp::Gt,
                Token::GtEq  => BinOp::GtEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_addition()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_addition(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplication()?;
        loop {
            let op = match self.peek() {
                Token::Plus  => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplication()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplication(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_primary()?;
        loop {
            let op = match self.peek() {
                Token::Star    => BinOp::Mul,
                Token::Slash   => BinOp::Div,
                Token::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        while !self.check(&Token::RParen) && !self.check(&Token::Eof) {
            args.push(self.parse_expr()?);
            if !self.eat(&Token::Comma) { break; }
        }
        Ok(args)
    }

    fn parse_call(&mut self, name: String) -> Result<Expr, SyntaxError> {
        self.expect(&Token::LParen)?;
        let args = self.parse_args()?;
        self.expect(&Token::RParen)?;
        Ok(Expr::Call(name, args))
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        if let Some(element) = self.peek_type() {
            self.advance();
            return self.parse_list(element);
        }

        match self.advance() {
            Token::Integer(n) => Ok(Expr::Constant(Literal::new(LiteralKind::Integer, n))),
            Token::Decimal(f) => Ok(Expr::Constant(Literal::new(LiteralKind::Decimal, f))),
            Token::Text(s)    => Ok(Expr::Constant(Literal::new(LiteralKind::Text, s))),
            Token::Bool(b)    => Ok(Expr::Constant(Literal::new(LiteralKind::Boolean, b))),
            Token::Null       => Ok(Expr::Constant(Literal::new(LiteralKind::Null, "nul"))),

            // Negative numeric literal
            Token::Minus => match self.advance() {
                Token::Integer(n) => Ok(Expr::Constant(Literal::new(LiteralKind::Integer, format!("-{}", n)))),
                Token::Decimal(f) => Ok(Expr::Constant(Literal::new(LiteralKind::Decimal, format!("-{}", f)))),
                other => Err(self.error(format!("Expected number after '-', got {:?}", other))),
            },

            Token::Ident(name) => {
                if self.check(&Token::LParen) {
                    self.parse_call(name)
                } else {
                    Ok(Expr::Identifier(name))
                }
            }

            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }

            other => Err(self.error(format!("Unexpected token in expression: {:?}", other))),
        }
    }

    fn parse_list(&mut self, element: ElementType) -> Result<Expr, SyntaxError> {
        self.expect(&Token::LBracket)?;
        let mut elems = Vec::new();
        while !self.check(&Token::RBracket) && !self.check(&Token::Eof) {
            elems.push(self.parse_expr()?);
            if !self.eat(&Token::Comma) { break; }
        }
        self.expect(&Token::RBracket)?;
        Ok(Expr::List(element, elems))
    }
}
