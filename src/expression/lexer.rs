//! Tokenizer for infix expressions, built on logos.

use logos::Logos;
use std::ops::Range;

use super::errors::ExpressionError;

/// Raw token produced by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token<'src> {
    // `2`, `2.`, `2.5`, `.5`, each with an optional exponent
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

impl Token<'_> {
    /// Short human-readable form used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(v) => v.to_string(),
            Token::Ident(name) => (*name).to_string(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Caret => "^".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

/// A token together with its byte span in the source text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned<'src> {
    pub token: Token<'src>,
    pub span: Range<usize>,
}

/// Tokenizes `source`, failing on the first character logos cannot match.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned<'_>>, ExpressionError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => {
                return Err(ExpressionError::InvalidCharacter {
                    text: lexer.slice().to_string(),
                    span,
                })
            }
        }
    }

    Ok(tokens)
}
