//! # Textual Constraints
//!
//! The constraint AST mirrors the UVL constraint grammar: all connectives
//! are binary, negation is unary, and parentheses are explicit nodes.
//! Constraint trees are built fresh per conversion and discarded after the
//! bridging pass; they are never persisted in the model.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    Literal(String),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
    Implication(Box<Constraint>, Box<Constraint>),
    Equivalence(Box<Constraint>, Box<Constraint>),
    /// Explicit grouping, synthesized on serialization and stripped on parse.
    Parenthesis(Box<Constraint>),
}

impl Constraint {
    pub fn not(inner: Constraint) -> Self {
        Constraint::Not(Box::new(inner))
    }

    pub fn and(left: Constraint, right: Constraint) -> Self {
        Constraint::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Constraint, right: Constraint) -> Self {
        Constraint::Or(Box::new(left), Box::new(right))
    }

    pub fn implication(left: Constraint, right: Constraint) -> Self {
        Constraint::Implication(Box::new(left), Box::new(right))
    }

    pub fn equivalence(left: Constraint, right: Constraint) -> Self {
        Constraint::Equivalence(Box::new(left), Box::new(right))
    }

    pub fn parenthesis(inner: Constraint) -> Self {
        Constraint::Parenthesis(Box::new(inner))
    }
}

/// Quotes a feature reference when it is not a plain (optionally
/// namespace-qualified) identifier.
fn write_reference(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let plain = !name.is_empty()
        && name
            .split(config::constants::NAMESPACE_SEPARATOR)
            .all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
                    && !segment.chars().next().unwrap_or('0').is_ascii_digit()
            });
    if plain {
        write!(f, "{}", name)
    } else {
        write!(f, "\"{}\"", name)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Literal(name) => write_reference(f, name),
            Constraint::Not(inner) => write!(f, "!{}", inner),
            Constraint::And(left, right) => write!(f, "{} & {}", left, right),
            Constraint::Or(left, right) => write!(f, "{} | {}", left, right),
            Constraint::Implication(left, right) => write!(f, "{} => {}", left, right),
            Constraint::Equivalence(left, right) => write!(f, "{} <=> {}", left, right),
            Constraint::Parenthesis(inner) => write!(f, "({})", inner),
        }
    }
}
