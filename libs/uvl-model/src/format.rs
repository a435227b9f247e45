//! # Translation Entry Points
//!
//! The four top-level translations between external documents, feature
//! models and propositional formulas:
//!
//! ```text
//!   UvlDocument  <-- parse/serialize -->  FeatureModel
//!   FeatureModel <-- lower/lift      -->  Formula
//! ```
//!
//! Each entry point accumulates diagnostics while it works. Warnings
//! travel alongside the produced value in a [`Translation`]; any
//! error-severity diagnostic turns the whole translation into
//! [`UvlError::Model`] carrying everything collected so far.

use crate::constraint::Constraint;
use crate::constraint_parser::parse_constraint;
use crate::convert::constraint_to_formula;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::document::UvlDocument;
use crate::error::{Aborted, UvlError};
use crate::feature::Feature;
use crate::formula::Formula;
use crate::range::Cardinality;
use crate::reader::read_document;
use crate::transform::tree_to_formula;
use crate::tree::{FeatureModel, Group};
use crate::writer::write_document;
use config::constants::FORMULA_ROOT_NAME;

/// File-format identity, as the host format registry sees it.
pub use config::constants::{FILE_EXTENSION, FORMAT_NAME};

/// A translation result together with the non-fatal diagnostics it raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation<T> {
    pub value: T,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Translation<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Builds a feature model from an external document, including its
/// cross-tree constraints.
pub fn parse_feature_model(document: &UvlDocument) -> Result<Translation<FeatureModel>, UvlError> {
    let mut diagnostics = Vec::new();
    let result = parse_inner(document, &mut diagnostics);
    finish(result, diagnostics)
}

fn parse_inner(
    document: &UvlDocument,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FeatureModel, Aborted> {
    let mut model = read_document(document, diagnostics)?;
    for text in &document.constraints {
        match parse_constraint(text) {
            Ok(constraint) => {
                log::debug!("parsed constraint: {}", constraint);
                model.add_constraint(constraint_to_formula(&constraint));
            }
            Err(error) => {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::Structural,
                    format!("cannot parse constraint `{}`: {}", text, error),
                ));
                return Err(Aborted);
            }
        }
    }
    Ok(model)
}

/// A serialized model: the external document plus the ordered constraint
/// ASTs, for callers that print the constraints themselves. The document
/// carries the same constraints pre-rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedModel {
    pub document: UvlDocument,
    pub constraints: Vec<Constraint>,
}

/// Exports a feature model into an external document.
pub fn serialize_feature_model(
    model: &FeatureModel,
) -> Result<Translation<SerializedModel>, UvlError> {
    let mut diagnostics = Vec::new();
    let result = write_document(model, &mut diagnostics)
        .map(|(document, constraints)| SerializedModel {
            document,
            constraints,
        });
    finish(result, diagnostics)
}

/// Lowers a feature model into one propositional formula: the conjunction
/// of every root's tree semantics and every cross-tree constraint.
pub fn model_to_formula(model: &FeatureModel) -> Result<Translation<Formula>, UvlError> {
    let mut diagnostics = Vec::new();
    let result = lower_inner(model, &mut diagnostics);
    finish(result, diagnostics)
}

fn lower_inner(
    model: &FeatureModel,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Formula, Aborted> {
    let mut parts = Vec::new();
    let mut aborted = false;
    // Keep lowering the remaining roots after a failure so one pass
    // reports every problem in the model.
    for root in model.roots() {
        match tree_to_formula(model, *root, diagnostics) {
            Ok(Formula::True) => {}
            Ok(formula) => parts.push(formula),
            Err(Aborted) => aborted = true,
        }
    }
    if aborted {
        return Err(Aborted);
    }
    parts.extend(model.constraints().iter().cloned());
    let conjunction = match parts.len() {
        1 => parts.remove(0),
        _ => Formula::And(parts),
    };
    Ok(Formula::Reference(Box::new(conjunction)))
}

/// Reads a document and lowers it straight to its propositional formula,
/// carrying warnings from both passes.
pub fn parse_formula(document: &UvlDocument) -> Result<Translation<Formula>, UvlError> {
    let parsed = parse_feature_model(document)?;
    chain(parsed.warnings, model_to_formula(&parsed.value))
}

/// Lifts a formula and serializes the resulting model in one step.
pub fn serialize_formula(formula: &Formula) -> Result<Translation<SerializedModel>, UvlError> {
    let lifted = formula_to_model(formula)?;
    chain(lifted.warnings, serialize_feature_model(&lifted.value))
}

/// Folds an earlier pass's warnings into the next pass's outcome.
fn chain<T>(
    mut warnings: Vec<Diagnostic>,
    next: Result<Translation<T>, UvlError>,
) -> Result<Translation<T>, UvlError> {
    match next {
        Ok(translation) => {
            warnings.extend(translation.warnings);
            Ok(Translation {
                value: translation.value,
                warnings,
            })
        }
        Err(UvlError::Model(diagnostics)) => {
            warnings.extend(diagnostics);
            Err(UvlError::Model(warnings))
        }
    }
}

/// Lifts a formula into a feature model: a synthetic abstract root with
/// one optional group holding every variable, and the formula itself as
/// the single cross-tree constraint.
pub fn formula_to_model(formula: &Formula) -> Result<Translation<FeatureModel>, UvlError> {
    let mut diagnostics = Vec::new();
    let result = lift_inner(formula, &mut diagnostics);
    finish(result, diagnostics)
}

fn lift_inner(
    formula: &Formula,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FeatureModel, Aborted> {
    let mut model = FeatureModel::new();

    let root_feature = Feature::new(FORMULA_ROOT_NAME).with_abstract(true);
    let root_id = match model.add_feature(root_feature) {
        Ok(id) => id,
        Err(_) => unreachable!("empty model has no duplicates"),
    };
    let root = model.add_root(root_id);
    model.node_mut(root).set_mandatory();

    let group_id = model.add_group(root, Group::new(Cardinality::at_least(0)));
    for name in formula.variables() {
        match model.add_feature(Feature::new(&name)) {
            Ok(id) => {
                let node = model.add_child(root, id, group_id);
                model.node_mut(node).set_optional();
            }
            Err(duplicate) => {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::Structural,
                        format!("variable `{}` collides with the synthetic root", duplicate),
                    )
                    .with_feature(&name),
                );
                return Err(Aborted);
            }
        }
    }

    model.add_constraint(formula.clone());
    Ok(model)
}

/// Seals a translation: error diagnostics fail it, warnings ride along.
fn finish<T>(
    result: Result<T, Aborted>,
    diagnostics: Vec<Diagnostic>,
) -> Result<Translation<T>, UvlError> {
    let failed = result.is_err()
        || diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error);
    match (result, failed) {
        (Ok(value), false) => Ok(Translation {
            value,
            warnings: diagnostics,
        }),
        _ => Err(UvlError::Model(diagnostics)),
    }
}
