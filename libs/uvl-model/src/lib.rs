//! # UVL Model Crate
//!
//! Bidirectional translation between UVL (Universal Variability Language)
//! feature models and propositional formulas. A feature model is a tree of
//! features grouped by cardinality constraints plus a list of cross-tree
//! constraints; its propositional semantics decides which feature
//! configurations are valid.
//!
//! ## Architecture
//!
//! ```text
//! UVL Document (serde) → reader → FeatureModel → transform → Formula
//! UVL Document (serde) ← writer ← FeatureModel ← format    ← Formula
//! ```
//!
//! ## Usage
//!
//! ### Parsing a document
//!
//! ```rust,ignore
//! use uvl_model::document::UvlDocument;
//! use uvl_model::format::{model_to_formula, parse_feature_model};
//!
//! let document: UvlDocument = serde_json::from_str(json)?;
//! let model = parse_feature_model(&document)?.into_value();
//! let formula = model_to_formula(&model)?.into_value();
//! ```
//!
//! ### Lifting a formula
//!
//! ```rust,ignore
//! use uvl_model::format::{formula_to_model, serialize_feature_model};
//!
//! let model = formula_to_model(&formula)?.into_value();
//! let document = serialize_feature_model(&model)?.into_value();
//! ```
//!
//! ## Design Principles
//!
//! - **Arena tree**: features and nodes live in flat arenas addressed by
//!   integer ids, so traversals can cache per-node results in plain vectors
//! - **Iterative traversals**: every tree walk uses an explicit work stack,
//!   immune to stack overflow on deep models
//! - **Diagnostics over panics**: malformed input accumulates diagnostics
//!   and fails the translation as a value, never the process

pub mod choose;
pub mod constraint;
pub mod constraint_parser;
pub mod convert;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod feature;
pub mod format;
pub mod formula;
pub mod range;
pub mod reader;
pub mod transform;
pub mod tree;
pub mod writer;

// Re-exports for convenience
pub use constraint::Constraint;
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use document::{UvlDocument, UvlFeature, UvlGroup};
pub use error::UvlError;
pub use feature::{AttributeValue, Feature, FeatureType};
pub use format::{
    formula_to_model, model_to_formula, parse_feature_model, parse_formula,
    serialize_feature_model, serialize_formula, SerializedModel, Translation,
};
pub use formula::Formula;
pub use range::Cardinality;
pub use tree::{FeatureModel, FeatureId, Group, NodeId, TreeNode};

#[cfg(test)]
mod tests;
