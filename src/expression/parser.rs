//! Recursive-descent parser for infix expressions.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | 'x' | CONST | FUNC '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` binds tighter than unary minus and is right-associative, so
//! `-x^2` is `-(x^2)` and `2^3^2` is `2^(3^2)`.

use std::f64::consts::{E, PI};

use super::ast::{BinOp, Expr, Func};
use super::errors::ExpressionError;
use super::lexer::{tokenize, Spanned, Token};

/// Deepest tree, and deepest parser recursion, accepted by [`parse`].
pub(crate) const MAX_DEPTH: usize = 256;

/// Parses `source` into an [`Expr`].
///
/// Trees deeper than [`MAX_DEPTH`] are rejected with
/// [`ExpressionError::TooDeep`]; evaluation and differentiation recurse
/// over the tree and rely on that bound.
pub(crate) fn parse(source: &str) -> Result<Expr, ExpressionError> {
    if source.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0, nesting: 0 };
    let (expr, _) = parser.expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(extra) => Err(parser.unexpected(extra, "end of expression")),
    }
}

/// Parsed subtree and its depth (a leaf has depth 1).
type Node = (Expr, usize);

fn checked_depth(depth: usize) -> Result<usize, ExpressionError> {
    if depth > MAX_DEPTH {
        return Err(ExpressionError::TooDeep { max: MAX_DEPTH });
    }
    Ok(depth)
}

fn binary(op: BinOp, (lhs, ld): Node, (rhs, rd): Node) -> Result<Node, ExpressionError> {
    let depth = checked_depth(ld.max(rd) + 1)?;
    Ok((Expr::binary(op, lhs, rhs), depth))
}

struct Parser<'src> {
    tokens: Vec<Spanned<'src>>,
    pos: usize,
    nesting: usize,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<&Spanned<'src>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned<'src>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, found: &Spanned<'_>, expected: &'static str) -> ExpressionError {
        ExpressionError::UnexpectedToken {
            found: found.token.describe(),
            expected,
            span: found.span.clone(),
        }
    }

    fn expect(&mut self, wanted: Token<'src>, expected: &'static str) -> Result<(), ExpressionError> {
        match self.advance() {
            Some(spanned) if spanned.token == wanted => Ok(()),
            Some(other) => Err(self.unexpected(&other, expected)),
            None => Err(ExpressionError::UnexpectedEnd { expected }),
        }
    }

    /// Runs `rule` one recursion level deeper.
    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Node, ExpressionError>,
    ) -> Result<Node, ExpressionError> {
        if self.nesting >= MAX_DEPTH {
            return Err(ExpressionError::TooDeep { max: MAX_DEPTH });
        }
        self.nesting += 1;
        let node = rule(self);
        self.nesting -= 1;
        node
    }

    fn expr(&mut self) -> Result<Node, ExpressionError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().map(|s| s.token) {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs)?;
        }
    }

    fn term(&mut self) -> Result<Node, ExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|s| s.token) {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs)?;
        }
    }

    fn unary(&mut self) -> Result<Node, ExpressionError> {
        match self.peek().map(|s| s.token) {
            Some(Token::Minus) => {
                self.pos += 1;
                let (inner, depth) = self.nested(Self::unary)?;
                Ok((Expr::neg(inner), checked_depth(depth + 1)?))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Node, ExpressionError> {
        let base = self.primary()?;
        if matches!(self.peek().map(|s| s.token), Some(Token::Caret)) {
            self.pos += 1;
            let exponent = self.nested(Self::unary)?;
            return binary(BinOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ExpressionError> {
        const EXPECTED: &str = "a number, `x`, a function call or `(`";

        let Some(spanned) = self.advance() else {
            return Err(ExpressionError::UnexpectedEnd { expected: EXPECTED });
        };

        match spanned.token {
            Token::Number(v) => Ok((Expr::Const(v), 1)),
            Token::LParen => {
                let inner = self.nested(Self::expr)?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            Token::Ident(name) => self.identifier(name, spanned),
            _ => Err(self.unexpected(&spanned, EXPECTED)),
        }
    }

    fn identifier(&mut self, name: &str, spanned: Spanned<'_>) -> Result<Node, ExpressionError> {
        match name {
            "x" => return Ok((Expr::Var, 1)),
            "pi" => return Ok((Expr::Const(PI), 1)),
            "e" | "E" => return Ok((Expr::Const(E), 1)),
            _ => {}
        }

        let called = matches!(self.peek().map(|s| s.token), Some(Token::LParen));
        match (Func::from_name(name), called) {
            (Some(func), true) => {
                self.pos += 1;
                let (arg, depth) = self.nested(Self::expr)?;
                self.expect(Token::RParen, "`)` after function argument")?;
                Ok((Expr::call(func, arg), checked_depth(depth + 1)?))
            }
            (Some(_), false) => Err(ExpressionError::MissingArgument {
                name: name.to_string(),
            }),
            (None, true) => Err(ExpressionError::UnknownFunction {
                name: name.to_string(),
                span: spanned.span,
            }),
            (None, false) => Err(ExpressionError::UnknownIdentifier {
                name: name.to_string(),
                span: spanned.span,
            }),
        }
    }
}
