//! # Propositional Formulas
//!
//! The formula node union used for satisfiability-oriented output. `And` and
//! `Or` are n-ary; the binary connectives always have exactly two operands.
//! The quantified forms (`AtLeast`, `AtMost`, `Between`, `Choose`) are part
//! of the vocabulary but have no counterpart in the textual constraint
//! grammar.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Formula {
    True,
    False,
    Literal { name: String, positive: bool },
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    BiImplies(Box<Formula>, Box<Formula>),
    /// Transparent wrapper marking an assembled model-level formula.
    Reference(Box<Formula>),
    AtLeast { bound: usize, children: Vec<Formula> },
    AtMost { bound: usize, children: Vec<Formula> },
    Between { lower: usize, upper: usize, children: Vec<Formula> },
    Choose { count: usize, children: Vec<Formula> },
}

impl Formula {
    /// A positive literal.
    pub fn literal(name: impl Into<String>) -> Self {
        Formula::Literal {
            name: name.into(),
            positive: true,
        }
    }

    pub fn not(formula: Formula) -> Self {
        Formula::Not(Box::new(formula))
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    pub fn bi_implies(left: Formula, right: Formula) -> Self {
        Formula::BiImplies(Box::new(left), Box::new(right))
    }

    /// All variable names referenced by this formula, in sorted order.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Literal { name, .. } => {
                names.insert(name.clone());
            }
            Formula::Not(child) | Formula::Reference(child) => child.collect_variables(names),
            Formula::And(children)
            | Formula::Or(children)
            | Formula::AtLeast { children, .. }
            | Formula::AtMost { children, .. }
            | Formula::Between { children, .. }
            | Formula::Choose { children, .. } => {
                for child in children {
                    child.collect_variables(names);
                }
            }
            Formula::Implies(left, right) | Formula::BiImplies(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
        }
    }

    /// Evaluates the formula under an assignment.
    ///
    /// Unassigned variables evaluate to false. An empty `And` is true and an
    /// empty `Or` is false, matching the n-ary connective semantics.
    pub fn evaluate(&self, assignment: &BTreeMap<String, bool>) -> bool {
        match self {
            Formula::True => true,
            Formula::False => false,
            Formula::Literal { name, positive } => {
                let value = assignment.get(name).copied().unwrap_or(false);
                if *positive {
                    value
                } else {
                    !value
                }
            }
            Formula::Not(child) => !child.evaluate(assignment),
            Formula::And(children) => children.iter().all(|child| child.evaluate(assignment)),
            Formula::Or(children) => children.iter().any(|child| child.evaluate(assignment)),
            Formula::Implies(left, right) => {
                !left.evaluate(assignment) || right.evaluate(assignment)
            }
            Formula::BiImplies(left, right) => {
                left.evaluate(assignment) == right.evaluate(assignment)
            }
            Formula::Reference(child) => child.evaluate(assignment),
            Formula::AtLeast { bound, children } => count_true(children, assignment) >= *bound,
            Formula::AtMost { bound, children } => count_true(children, assignment) <= *bound,
            Formula::Between {
                lower,
                upper,
                children,
            } => {
                let count = count_true(children, assignment);
                count >= *lower && count <= *upper
            }
            Formula::Choose { count, children } => count_true(children, assignment) == *count,
        }
    }
}

fn count_true(children: &[Formula], assignment: &BTreeMap<String, bool>) -> usize {
    children
        .iter()
        .filter(|child| child.evaluate(assignment))
        .count()
}
