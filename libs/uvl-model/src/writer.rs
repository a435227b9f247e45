//! # Document Writer
//!
//! Exports the internal feature tree back into the external UVL document
//! shape. The traversal is an explicit post-order walk so children are
//! rendered before the group that contains them.
//!
//! The export is intentionally lossy in one spot: per-feature instance
//! ranges collapse into mandatory/optional group membership, so a feature
//! that was read with an explicit `[2, 5]` range comes back as optional.

use crate::constraint::Constraint;
use crate::convert::formula_to_constraint;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::document::{group_kind, UvlDocument, UvlFeature, UvlGroup};
use crate::error::Aborted;
use crate::feature::{AttributeValue, FeatureType};
use crate::tree::{FeatureModel, NodeId};
use config::constants::{ABSTRACT_ATTRIBUTE, NAMESPACE_SEPARATOR};

/// Serializes a feature model into an external document plus the ordered
/// constraint ASTs. The document carries the constraints pre-rendered as
/// text; the structured list is for callers that print them themselves.
///
/// A model with several roots exports only the first and reports a
/// warning; a model with no root cannot be represented at all.
pub fn write_document(
    model: &FeatureModel,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(UvlDocument, Vec<Constraint>), Aborted> {
    let root = match model.roots() {
        [] => {
            diagnostics.push(Diagnostic::error(
                DiagnosticKind::Structural,
                "model has no root feature",
            ));
            return Err(Aborted);
        }
        [root] => *root,
        [root, ..] => {
            log::warn!(
                "model has {} roots, exporting only the first",
                model.roots().len()
            );
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::MultiRoot,
                "model has several roots, only the first is exported",
            ));
            *root
        }
    };

    let root_feature = export_tree(model, root, diagnostics)?;
    let mut document = UvlDocument::new(root_feature);

    let mut constraints = Vec::with_capacity(model.constraints().len());
    for formula in model.constraints() {
        match formula_to_constraint(formula) {
            Ok(constraint) => {
                document.constraints.push(constraint.to_string());
                constraints.push(constraint);
            }
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                return Err(Aborted);
            }
        }
    }

    Ok((document, constraints))
}

/// Renders the subtree under `root` bottom-up.
fn export_tree(
    model: &FeatureModel,
    root: NodeId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<UvlFeature, Aborted> {
    let mut rendered: Vec<Option<UvlFeature>> = vec![None; model.node_count()];
    let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];

    while let Some((node_id, expanded)) = stack.pop() {
        if !expanded {
            stack.push((node_id, true));
            for child in model.node(node_id).children() {
                stack.push((*child, false));
            }
            continue;
        }

        let node = model.node(node_id);
        let mut feature = export_feature(model, node_id, diagnostics)?;

        for (group_id, group) in node.groups().iter().enumerate() {
            let children = model.group_children(node_id, group_id);
            if children.is_empty() {
                continue;
            }

            if group.is_and() {
                // Mandatoriness lives on the child nodes; the external shape
                // wants them sorted into two separate groups.
                let mut mandatory = Vec::new();
                let mut optional = Vec::new();
                for child in children {
                    let Some(exported) = rendered[child.index()].take() else {
                        unreachable!("post-order renders children before parents");
                    };
                    if model.node(child).is_mandatory() {
                        mandatory.push(exported);
                    } else {
                        optional.push(exported);
                    }
                }
                if !mandatory.is_empty() {
                    feature
                        .groups
                        .push(UvlGroup::new(group_kind::MANDATORY).with_features(mandatory));
                }
                if !optional.is_empty() {
                    feature
                        .groups
                        .push(UvlGroup::new(group_kind::OPTIONAL).with_features(optional));
                }
                continue;
            }

            let mut exported_children = Vec::with_capacity(children.len());
            for child in children {
                let Some(exported) = rendered[child.index()].take() else {
                    unreachable!("post-order renders children before parents");
                };
                exported_children.push(exported);
            }

            let external = if group.is_or() {
                UvlGroup::new(group_kind::OR)
            } else if group.is_alternative() {
                UvlGroup::new(group_kind::ALTERNATIVE)
            } else {
                let mut cardinality = UvlGroup::new(group_kind::CARDINALITY);
                cardinality.lower_bound = Some(group.range.lower().to_string());
                cardinality.upper_bound = group.range.upper().map(|upper| upper.to_string());
                cardinality
            };
            feature.groups.push(external.with_features(exported_children));
        }

        rendered[node_id.index()] = Some(feature);
    }

    match rendered[root.index()].take() {
        Some(feature) => Ok(feature),
        None => unreachable!("root is rendered last"),
    }
}

/// Renders one feature without its groups.
fn export_feature(
    model: &FeatureModel,
    node_id: NodeId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<UvlFeature, Aborted> {
    let node = model.node(node_id);
    let internal = model.feature(node.feature());

    let segments: Vec<&str> = internal.name.split(NAMESPACE_SEPARATOR).collect();
    let (namespace, name) = match segments.as_slice() {
        [name] => (None, (*name).to_string()),
        [namespace, name] => (Some((*namespace).to_string()), (*name).to_string()),
        _ => {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::Structural,
                    format!("feature name `{}` has nested namespaces", internal.name),
                )
                .with_feature(&internal.name),
            );
            return Err(Aborted);
        }
    };

    let mut feature = UvlFeature::new(name);
    feature.namespace = namespace;
    if internal.feature_type != FeatureType::Bool {
        feature.feature_type = Some(internal.feature_type.tag().to_string());
    }
    feature.attributes = internal.attributes.clone();
    if internal.is_abstract {
        feature
            .attributes
            .insert(ABSTRACT_ATTRIBUTE.to_string(), AttributeValue::Bool(true));
    }

    Ok(feature)
}
