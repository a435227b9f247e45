//! # Constraint Expression Parser
//!
//! Parses the textual constraint grammar into [`Constraint`] trees. The
//! tokenization is handled entirely by logos; parsing is recursive descent
//! over the token list with UVL operator precedence (loosest to tightest):
//! `<=>`, `=>`, `|`, `&`, `!`. The arrow operators are right-associative.
//!
//! Parentheses group explicitly and are stripped here; they reappear as
//! synthesized [`Constraint::Parenthesis`] nodes on serialization only.

use crate::constraint::Constraint;
use logos::Logos;
use thiserror::Error;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("!")]
    Not,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("=>")]
    Implies,
    #[token("<=>")]
    Equivalent,
    /// Double-quoted feature reference, for names the identifier syntax
    /// cannot express.
    #[regex(r#""[^"]*""#)]
    Quoted,
    /// Identifier, optionally namespace-qualified.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*")]
    Reference,
}

/// Error produced when a constraint expression does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {offset}")]
pub struct ExprParseError {
    pub message: String,
    pub offset: usize,
}

impl ExprParseError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Parses one constraint expression.
pub fn parse_constraint(text: &str) -> Result<Constraint, ExprParseError> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.slice().to_string(), lexer.span().start)),
            Err(()) => {
                return Err(ExprParseError::new(
                    format!("unexpected character `{}`", lexer.slice()),
                    lexer.span().start,
                ))
            }
        }
    }
    let mut parser = Parser {
        tokens,
        position: 0,
        end: text.len(),
    };
    let constraint = parser.equivalence()?;
    match parser.peek() {
        None => Ok(constraint),
        Some((_, slice, offset)) => Err(ExprParseError::new(
            format!("unexpected `{}` after expression", slice),
            *offset,
        )),
    }
}

struct Parser {
    tokens: Vec<(Token, String, usize)>,
    position: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, String, usize)> {
        self.tokens.get(self.position)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek().map(|t| t.0) == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn equivalence(&mut self) -> Result<Constraint, ExprParseError> {
        let left = self.implication()?;
        if self.eat(Token::Equivalent) {
            let right = self.equivalence()?;
            return Ok(Constraint::equivalence(left, right));
        }
        Ok(left)
    }

    fn implication(&mut self) -> Result<Constraint, ExprParseError> {
        let left = self.disjunction()?;
        if self.eat(Token::Implies) {
            let right = self.implication()?;
            return Ok(Constraint::implication(left, right));
        }
        Ok(left)
    }

    fn disjunction(&mut self) -> Result<Constraint, ExprParseError> {
        let mut left = self.conjunction()?;
        while self.eat(Token::Or) {
            let right = self.conjunction()?;
            left = Constraint::or(left, right);
        }
        Ok(left)
    }

    fn conjunction(&mut self) -> Result<Constraint, ExprParseError> {
        let mut left = self.unary()?;
        while self.eat(Token::And) {
            let right = self.unary()?;
            left = Constraint::and(left, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Constraint, ExprParseError> {
        match self.peek().cloned() {
            Some((Token::Not, _, _)) => {
                self.position += 1;
                Ok(Constraint::not(self.unary()?))
            }
            Some((Token::LeftParen, _, offset)) => {
                self.position += 1;
                let inner = self.equivalence()?;
                if !self.eat(Token::RightParen) {
                    return Err(ExprParseError::new("unclosed parenthesis", offset));
                }
                // Parentheses are grouping only; no node survives the parse.
                Ok(inner)
            }
            Some((Token::Reference, slice, _)) => {
                self.position += 1;
                Ok(Constraint::Literal(slice))
            }
            Some((Token::Quoted, slice, _)) => {
                self.position += 1;
                Ok(Constraint::Literal(slice[1..slice.len() - 1].to_string()))
            }
            Some((_, slice, offset)) => Err(ExprParseError::new(
                format!("expected a feature reference, found `{}`", slice),
                offset,
            )),
            None => Err(ExprParseError::new(
                "expected a feature reference, found end of input",
                self.end,
            )),
        }
    }
}
