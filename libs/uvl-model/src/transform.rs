//! # Feature Tree → Formula
//!
//! Walks a feature tree bottom-up, producing one formula per subtree that
//! encodes "if this feature is selected, its group constraint over children
//! must hold". The traversal is iterative post-order over arena ids with a
//! per-call formula cache; no state survives the call.
//!
//! The reverse direction (formula → tree reconstruction) is not supported.

use crate::choose::n_choose_k;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::Aborted;
use crate::formula::Formula;
use crate::tree::{FeatureModel, NodeId};

/// Converts the subtree rooted at `root` into a formula.
///
/// On failure pushes the offending condition onto `diagnostics` and aborts;
/// no partial formula is returned.
pub fn tree_to_formula(
    model: &FeatureModel,
    root: NodeId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Formula, Aborted> {
    let mut cache: Vec<Option<Formula>> = vec![None; model.node_count()];
    let mut stack = vec![(root, false)];

    while let Some((node_id, expanded)) = stack.pop() {
        if !expanded {
            stack.push((node_id, true));
            for &child in model.node(node_id).children() {
                stack.push((child, false));
            }
            continue;
        }

        let node = model.node(node_id);
        let name = model.feature(node.feature()).name.clone();
        if name.is_empty() {
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::Structural,
                "feature has no name",
            ));
            return Err(Aborted);
        }

        let formula = if node.children().is_empty() {
            if node.is_optional() {
                Formula::True
            } else if node.is_mandatory() {
                Formula::literal(&name)
            } else {
                diagnostics.push(neither_optional_nor_mandatory(&name));
                return Err(Aborted);
            }
        } else {
            let Some(group) = node.groups().first().copied() else {
                diagnostics.push(
                    Diagnostic::error(DiagnosticKind::Structural, format!("{} has no group", name))
                        .with_feature(&name),
                );
                return Err(Aborted);
            };

            let children_formula = if group.is_alternative() {
                exactly_one(model, node_id, &mut cache)
            } else if group.is_or() {
                Formula::Or(take_child_formulas(model, node_id, &mut cache, false))
            } else if group.is_and() {
                Formula::And(take_child_formulas(model, node_id, &mut cache, true))
            } else {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::Structural,
                        format!("{} has an unsupported group kind", name),
                    )
                    .with_feature(&name),
                );
                return Err(Aborted);
            };

            if is_empty_connective(&children_formula) {
                // No child contributes a constraint; the subtree collapses
                // to the feature itself.
                Formula::literal(&name)
            } else if node.is_optional() {
                Formula::implies(Formula::literal(&name), children_formula)
            } else if node.is_mandatory() {
                Formula::And(vec![Formula::literal(&name), children_formula])
            } else {
                diagnostics.push(neither_optional_nor_mandatory(&name));
                return Err(Aborted);
            }
        };

        cache[node_id.index()] = Some(formula);
    }

    match cache[root.index()].take() {
        Some(formula) => Ok(formula),
        None => unreachable!("post-order traversal converts the root last"),
    }
}

/// Encodes an alternative group: exactly one child literal holds.
///
/// Both halves come from the combinatorial generator: selecting every child
/// at once gives the single at-least-one clause, selecting pairs negated
/// gives the pairwise at-most-one clauses. Child subtree formulas are
/// conjoined on top so nested groups keep their own semantics.
fn exactly_one(model: &FeatureModel, node: NodeId, cache: &mut [Option<Formula>]) -> Formula {
    let literals: Vec<Formula> = model
        .node(node)
        .children()
        .iter()
        .map(|&child| Formula::literal(&model.feature(model.node(child).feature()).name))
        .collect();

    let mut parts = vec![
        n_choose_k(&literals, literals.len(), false),
        n_choose_k(&literals, 2, true),
    ];
    for subtree in take_child_formulas(model, node, cache, false) {
        if subtree != Formula::True {
            parts.push(subtree);
        }
    }
    Formula::And(parts)
}

/// Collects the already-converted formulas of a node's children, in tree
/// order, optionally keeping only the mandatory children (AND groups).
fn take_child_formulas(
    model: &FeatureModel,
    node: NodeId,
    cache: &mut [Option<Formula>],
    mandatory_only: bool,
) -> Vec<Formula> {
    model
        .node(node)
        .children()
        .iter()
        .filter(|&&child| !mandatory_only || model.node(child).is_mandatory())
        .map(|&child| match cache[child.index()].take() {
            Some(formula) => formula,
            None => unreachable!("children are converted before their parent"),
        })
        .collect()
}

fn is_empty_connective(formula: &Formula) -> bool {
    match formula {
        Formula::And(children) | Formula::Or(children) => children.is_empty(),
        _ => false,
    }
}

fn neither_optional_nor_mandatory(name: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticKind::Structural,
        format!("{} is neither an optional nor a mandatory feature", name),
    )
    .with_feature(name)
}
