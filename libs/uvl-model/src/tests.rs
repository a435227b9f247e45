use crate::choose::{binomial, n_choose_k};
use crate::constraint::Constraint;
use crate::constraint_parser::parse_constraint;
use crate::convert::{constraint_to_formula, formula_to_constraint};
use crate::formula::Formula;
use crate::range::Cardinality;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn literals(names: &[&str]) -> Vec<Formula> {
    names.iter().map(|name| Formula::literal(*name)).collect()
}

fn clauses(formula: &Formula) -> &[Formula] {
    match formula {
        Formula::And(clauses) => clauses,
        other => panic!("expected a conjunction, got {:?}", other),
    }
}

#[test]
fn binomial_matches_pascal_identity() {
    for n in 1..20usize {
        for k in 1..n {
            assert_eq!(binomial(n, k), binomial(n - 1, k - 1) + binomial(n - 1, k));
        }
    }
    assert_eq!(binomial(5, 0), 1);
    assert_eq!(binomial(5, 5), 1);
    assert_eq!(binomial(3, 7), 0);
}

#[test]
fn choose_zero_is_a_tautology() {
    let formula = n_choose_k(&literals(&["a", "b"]), 0, false);
    match formula {
        Formula::Or(children) => assert_eq!(children.len(), 2),
        other => panic!("expected a tautology clause, got {:?}", other),
    }
    let mut assignment = BTreeMap::new();
    assignment.insert("a".to_string(), true);
    assert!(n_choose_k(&literals(&["a", "b"]), 0, false).evaluate(&assignment));
}

#[test]
fn choose_beyond_n_plus_one_is_a_contradiction() {
    let formula = n_choose_k(&literals(&["a", "b"]), 4, false);
    assert!(!formula.evaluate(&BTreeMap::new()));
    let mut assignment = BTreeMap::new();
    assignment.insert("a".to_string(), true);
    assignment.insert("b".to_string(), true);
    assert!(!formula.evaluate(&assignment));
}

#[test]
fn choose_one_of_three_has_three_clauses() {
    let formula = n_choose_k(&literals(&["a", "b", "c"]), 1, false);
    assert_eq!(clauses(&formula).len(), 3);
}

#[test]
fn choose_pairs_negated_yields_at_most_one() {
    // One clause per pair, each saying "not both".
    let formula = n_choose_k(&literals(&["a", "b", "c"]), 2, true);
    for clause in clauses(&formula) {
        match clause {
            Formula::Or(disjuncts) => {
                assert_eq!(disjuncts.len(), 2);
                for disjunct in disjuncts {
                    assert!(matches!(disjunct, Formula::Not(_)));
                }
            }
            other => panic!("expected a binary clause, got {:?}", other),
        }
    }
}

proptest! {
    #[test]
    fn choose_clause_count_is_binomial(n in 1usize..9, k in 1usize..9) {
        prop_assume!(k <= n);
        let names: Vec<String> = (0..n).map(|i| format!("f{}", i)).collect();
        let elements: Vec<Formula> =
            names.iter().map(|name| Formula::literal(name.clone())).collect();
        let formula = n_choose_k(&elements, k, false);
        prop_assert_eq!(clauses(&formula).len() as u128, binomial(n, k));
    }

    #[test]
    fn choose_clauses_have_width_k(n in 2usize..8, k in 1usize..8) {
        prop_assume!(k <= n);
        let elements: Vec<Formula> =
            (0..n).map(|i| Formula::literal(format!("f{}", i))).collect();
        let formula = n_choose_k(&elements, k, false);
        for clause in clauses(&formula) {
            match clause {
                Formula::Or(disjuncts) => prop_assert_eq!(disjuncts.len(), k),
                other => prop_assert!(false, "expected a clause, got {:?}", other),
            }
        }
    }
}

#[test]
fn cardinality_classification() {
    assert!(crate::tree::Group::new(Cardinality::at_least(0)).is_and());
    assert!(crate::tree::Group::new(Cardinality::at_least(1)).is_or());
    assert!(crate::tree::Group::new(Cardinality::exactly(1)).is_alternative());
    assert!(crate::tree::Group::new(Cardinality::of(2, 4)).is_cardinality());
}

#[test]
fn cardinality_contains_bounds() {
    let range = Cardinality::of(1, 3);
    assert!(!range.contains(0));
    assert!(range.contains(1));
    assert!(range.contains(3));
    assert!(!range.contains(4));

    let unbounded = Cardinality::at_least(2);
    assert!(unbounded.contains(1_000_000));
    assert!(!unbounded.contains(1));
}

#[test]
fn formula_variables_deduplicate_and_sort() {
    let formula = Formula::And(vec![
        Formula::literal("b"),
        Formula::not(Formula::literal("a")),
        Formula::implies(Formula::literal("b"), Formula::literal("c")),
    ]);
    let names: Vec<String> = formula.variables().into_iter().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn evaluate_treats_missing_variables_as_false() {
    let formula = Formula::Or(vec![Formula::literal("present"), Formula::literal("absent")]);
    let mut assignment = BTreeMap::new();
    assignment.insert("present".to_string(), true);
    assert!(formula.evaluate(&assignment));
    assignment.insert("present".to_string(), false);
    assert!(!formula.evaluate(&assignment));
}

#[test]
fn nary_conjunction_folds_left() {
    let formula = Formula::And(literals(&["a", "b", "c"]));
    let constraint = formula_to_constraint(&formula).unwrap();
    let expected = Constraint::and(
        Constraint::and(
            Constraint::Literal("a".to_string()),
            Constraint::Literal("b".to_string()),
        ),
        Constraint::Literal("c".to_string()),
    );
    assert_eq!(constraint, expected);
    assert_eq!(constraint.to_string(), "a & b & c");
}

#[test]
fn binary_connectives_round_trip_through_text() {
    let formula = Formula::implies(
        Formula::And(literals(&["a", "b"])),
        Formula::not(Formula::literal("c")),
    );
    let constraint = formula_to_constraint(&formula).unwrap();
    let text = constraint.to_string();
    let reparsed = parse_constraint(&text).unwrap();
    assert_eq!(
        constraint_to_formula(&reparsed),
        constraint_to_formula(&constraint)
    );
}

#[test]
fn constant_formulas_cannot_become_constraints() {
    assert!(formula_to_constraint(&Formula::True).is_err());
    assert!(formula_to_constraint(&Formula::False).is_err());
}

#[test]
fn quantified_formulas_cannot_become_constraints() {
    let quantified = Formula::Choose {
        count: 1,
        children: literals(&["a", "b"]),
    };
    assert!(formula_to_constraint(&quantified).is_err());
}

#[test]
fn references_are_transparent_in_conversion() {
    let formula = Formula::Reference(Box::new(Formula::literal("a")));
    let constraint = formula_to_constraint(&formula).unwrap();
    assert_eq!(constraint, Constraint::Literal("a".to_string()));
}

#[test]
fn parser_honours_precedence() {
    let constraint = parse_constraint("a | b & !c => d").unwrap();
    let formula = constraint_to_formula(&constraint);

    let mut assignment = BTreeMap::new();
    assignment.insert("a".to_string(), true);
    assignment.insert("b".to_string(), false);
    assignment.insert("c".to_string(), true);
    assignment.insert("d".to_string(), false);
    // (a | (b & !c)) => d with a true and d false is false.
    assert!(!formula.evaluate(&assignment));

    assignment.insert("d".to_string(), true);
    assert!(formula.evaluate(&assignment));
}

#[test]
fn parser_accepts_quoted_and_namespaced_references() {
    let constraint = parse_constraint("\"weird name\" & ns::feature").unwrap();
    let formula = constraint_to_formula(&constraint);
    let names: Vec<String> = formula.variables().into_iter().collect();
    assert_eq!(names, vec!["ns::feature", "weird name"]);
}

#[test]
fn parser_rejects_trailing_tokens() {
    assert!(parse_constraint("a b").is_err());
    assert!(parse_constraint("a &").is_err());
    assert!(parse_constraint("(a").is_err());
    assert!(parse_constraint("").is_err());
}

#[test]
fn display_quotes_non_identifier_references() {
    let constraint = Constraint::and(
        Constraint::Literal("plain".to_string()),
        Constraint::Literal("has space".to_string()),
    );
    assert_eq!(constraint.to_string(), "plain & \"has space\"");
}
