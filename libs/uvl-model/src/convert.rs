//! # Formula ⇄ Constraint Bridge
//!
//! Structural, one-to-one mapping between [`Formula`] trees and the binary
//! textual-constraint AST. N-ary connectives fold pairwise left-to-right
//! (`((c1 & c2) & c3) & c4`); the fold order is fixed so serialization
//! round-trips are stable. Each owned node is converted exactly once.
//!
//! The raw-text direction lives elsewhere: constraint text is parsed by
//! [`crate::constraint_parser`], and this bridge only ever sees finished
//! trees.

use crate::constraint::Constraint;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::formula::Formula;

/// Converts a formula to a textual-constraint tree.
///
/// Fails with a structural diagnostic for forms the constraint grammar
/// cannot express: the constants, the quantified connectives, and empty
/// n-ary connectives. This is a hard capability gap, not a recoverable
/// condition.
pub fn formula_to_constraint(formula: &Formula) -> Result<Constraint, Diagnostic> {
    let constraint = convert(formula)?;
    // A top-level parenthesis carries no grouping information.
    Ok(match constraint {
        Constraint::Parenthesis(inner) => *inner,
        other => other,
    })
}

fn convert(formula: &Formula) -> Result<Constraint, Diagnostic> {
    match formula {
        Formula::Literal { name, positive } => {
            let literal = Constraint::Literal(name.clone());
            Ok(if *positive {
                literal
            } else {
                Constraint::not(literal)
            })
        }
        Formula::Not(child) => Ok(Constraint::not(convert(child)?)),
        Formula::And(children) => Ok(Constraint::parenthesis(fold(children, Constraint::and)?)),
        Formula::Or(children) => Ok(Constraint::parenthesis(fold(children, Constraint::or)?)),
        Formula::Implies(left, right) => Ok(Constraint::parenthesis(Constraint::implication(
            convert(left)?,
            convert(right)?,
        ))),
        Formula::BiImplies(left, right) => Ok(Constraint::parenthesis(Constraint::equivalence(
            convert(left)?,
            convert(right)?,
        ))),
        Formula::Reference(child) => convert(child),
        Formula::True | Formula::False => Err(Diagnostic::error(
            DiagnosticKind::Structural,
            "boolean constants cannot be expressed in the constraint grammar",
        )),
        Formula::AtLeast { .. }
        | Formula::AtMost { .. }
        | Formula::Between { .. }
        | Formula::Choose { .. } => Err(Diagnostic::error(
            DiagnosticKind::Structural,
            "quantified connectives cannot be expressed in the constraint grammar",
        )),
    }
}

/// Left fold of an n-ary connective into a binary chain.
fn fold(
    children: &[Formula],
    connect: fn(Constraint, Constraint) -> Constraint,
) -> Result<Constraint, Diagnostic> {
    let mut converted = children.iter().map(convert);
    let first = converted.next().ok_or_else(|| {
        Diagnostic::error(
            DiagnosticKind::Structural,
            "empty connective cannot be expressed in the constraint grammar",
        )
    })??;
    converted.try_fold(first, |chain, next| Ok(connect(chain, next?)))
}

/// Converts an already-parsed constraint tree to a formula.
///
/// The mapping is total: every constraint form has a formula counterpart.
/// Parenthesis nodes are transparent and leave no trace.
pub fn constraint_to_formula(constraint: &Constraint) -> Formula {
    match constraint {
        Constraint::Literal(name) => Formula::literal(name.clone()),
        Constraint::Not(inner) => Formula::not(constraint_to_formula(inner)),
        Constraint::And(left, right) => Formula::And(vec![
            constraint_to_formula(left),
            constraint_to_formula(right),
        ]),
        Constraint::Or(left, right) => Formula::Or(vec![
            constraint_to_formula(left),
            constraint_to_formula(right),
        ]),
        Constraint::Implication(left, right) => Formula::implies(
            constraint_to_formula(left),
            constraint_to_formula(right),
        ),
        Constraint::Equivalence(left, right) => Formula::bi_implies(
            constraint_to_formula(left),
            constraint_to_formula(right),
        ),
        Constraint::Parenthesis(inner) => constraint_to_formula(inner),
    }
}
