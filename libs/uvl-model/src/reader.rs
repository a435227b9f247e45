//! # Document Reader
//!
//! Builds the internal feature tree from an external UVL document. The
//! traversal uses an explicit work stack of document-feature/tree-node
//! pairs instead of recursion, so arbitrarily deep documents cannot
//! exhaust the call stack.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::document::{group_kind, UvlDocument, UvlFeature};
use crate::error::Aborted;
use crate::feature::{AttributeValue, Feature, FeatureType};
use crate::range::Cardinality;
use crate::tree::{FeatureId, FeatureModel, Group, NodeId};
use config::constants::{ABSTRACT_ATTRIBUTE, DEFAULT_FEATURE_UPPER_BOUND};

/// Builds a feature model from an external document.
///
/// Constraints are not touched here; the orchestrator parses and attaches
/// them after the tree exists.
pub fn read_document(
    document: &UvlDocument,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FeatureModel, Aborted> {
    let mut model = FeatureModel::new();

    let root_feature = create_feature(&mut model, &document.root, diagnostics)?;
    let root_node = model.add_root(root_feature);
    apply_bounds_range(&mut model, root_node, &document.root, diagnostics)?;

    let mut stack: Vec<(&UvlFeature, NodeId)> = vec![(&document.root, root_node)];
    while let Some((feature, node)) = stack.pop() {
        for group in &feature.groups {
            let range = group_range(group, &feature.name, diagnostics)?;
            let group_id = model.add_group(node, Group::new(range));

            for child in &group.features {
                let child_feature = create_feature(&mut model, child, diagnostics)?;
                let child_node = model.add_child(node, child_feature, group_id);
                match group.group_type.as_str() {
                    group_kind::MANDATORY => model.node_mut(child_node).set_mandatory(),
                    group_kind::OPTIONAL => model.node_mut(child_node).set_optional(),
                    _ => apply_bounds_range(&mut model, child_node, child, diagnostics)?,
                }
                stack.push((child, child_node));
            }
        }
    }

    Ok(model)
}

/// Creates the internal feature for one document feature.
fn create_feature(
    model: &mut FeatureModel,
    feature: &UvlFeature,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FeatureId, Aborted> {
    if feature.name.trim().is_empty() {
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::Structural,
            "feature has no name",
        ));
        return Err(Aborted);
    }
    let name = feature.qualified_name();

    let Some(feature_type) = FeatureType::from_tag(feature.feature_type.as_deref()) else {
        diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::Domain,
                format!(
                    "unrecognized feature type `{}`",
                    feature.feature_type.as_deref().unwrap_or_default()
                ),
            )
            .with_feature(&name),
        );
        return Err(Aborted);
    };

    let is_abstract = match feature.attributes.get(ABSTRACT_ATTRIBUTE) {
        None => false,
        Some(AttributeValue::Bool(value)) => *value,
        Some(_) => {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::Domain,
                    format!("attribute `{}` must be boolean", ABSTRACT_ATTRIBUTE),
                )
                .with_feature(&name),
            );
            return Err(Aborted);
        }
    };

    let mut attributes = feature.attributes.clone();
    attributes.remove(ABSTRACT_ATTRIBUTE);

    let internal = Feature {
        name: name.clone(),
        feature_type,
        is_abstract,
        attributes,
    };
    match model.add_feature(internal) {
        Ok(id) => Ok(id),
        Err(duplicate) => {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::Structural,
                    format!("duplicate feature name `{}`", duplicate),
                )
                .with_feature(&name),
            );
            Err(Aborted)
        }
    }
}

/// Derives a node's instance range from its document bounds.
///
/// Both bounds → exact range; lower only → at least; upper only → at most;
/// neither → at most one.
fn apply_bounds_range(
    model: &mut FeatureModel,
    node: NodeId,
    feature: &UvlFeature,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), Aborted> {
    let lower = parse_bound(feature.lower_bound.as_deref(), &feature.name, diagnostics)?;
    let upper = parse_bound(feature.upper_bound.as_deref(), &feature.name, diagnostics)?;
    let range = match (lower, upper) {
        (Some(lower), Some(upper)) => Cardinality::of(lower, upper),
        (Some(lower), None) => Cardinality::at_least(lower),
        (None, Some(upper)) => Cardinality::at_most(upper),
        (None, None) => Cardinality::at_most(DEFAULT_FEATURE_UPPER_BOUND),
    };
    model.node_mut(node).set_feature_range(range);
    Ok(())
}

/// Classifies an external group into an internal cardinality range.
fn group_range(
    group: &crate::document::UvlGroup,
    parent_name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Cardinality, Aborted> {
    match group.group_type.as_str() {
        // Mandatoriness is carried per child, not per group.
        group_kind::MANDATORY | group_kind::OPTIONAL => Ok(Cardinality::at_least(0)),
        group_kind::ALTERNATIVE => Ok(Cardinality::exactly(1)),
        group_kind::OR => Ok(Cardinality::at_least(1)),
        group_kind::CARDINALITY => {
            let Some(lower) = parse_bound(group.lower_bound.as_deref(), parent_name, diagnostics)?
            else {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::Cardinality,
                        "cardinality group requires a lower bound",
                    )
                    .with_feature(parent_name),
                );
                return Err(Aborted);
            };
            let upper = parse_bound(group.upper_bound.as_deref(), parent_name, diagnostics)?;
            Ok(match upper {
                Some(upper) => Cardinality::of(lower, upper),
                None => Cardinality::at_least(lower),
            })
        }
        other => {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::Structural,
                    format!("unknown group type `{}`", other),
                )
                .with_feature(parent_name),
            );
            Err(Aborted)
        }
    }
}

fn parse_bound(
    bound: Option<&str>,
    feature_name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<u64>, Aborted> {
    match bound {
        None => Ok(None),
        Some(text) => match text.parse::<u64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::Domain,
                        format!("cannot parse bound `{}` as an integer", text),
                    )
                    .with_feature(feature_name),
                );
                Err(Aborted)
            }
        },
    }
}
