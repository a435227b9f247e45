//! # External Document Model
//!
//! Types for exchanging a pre-parsed UVL document with the out-of-scope
//! grammar parser and printer. Parsing raw UVL text happens outside this
//! crate; the document arrives here as serde data (for example deserialized
//! from JSON) and leaves the same way.
//!
//! ## Architecture
//!
//! ```text
//! Parse:     UVL source → [external grammar parser] → UvlDocument → FeatureModel
//! Serialize: FeatureModel → UvlDocument (+ constraint ASTs) → [external printer] → UVL source
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uvl_model::document::UvlDocument;
//! use uvl_model::parse_feature_model;
//!
//! let document: UvlDocument = serde_json::from_str(json)?;
//! let model = parse_feature_model(&document)?;
//! ```

use crate::feature::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group kind tags used by the external document model.
pub mod group_kind {
    pub const MANDATORY: &str = "mandatory";
    pub const OPTIONAL: &str = "optional";
    pub const ALTERNATIVE: &str = "alternative";
    pub const OR: &str = "or";
    pub const CARDINALITY: &str = "cardinality";
}

/// A whole UVL document: one root feature plus the raw constraint
/// expressions collected from the constraints section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvlDocument {
    pub root: UvlFeature,
    /// Constraint expressions as source strings, in document order.
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl UvlDocument {
    pub fn new(root: UvlFeature) -> Self {
        Self {
            root,
            constraints: Vec::new(),
        }
    }
}

/// A feature as the external parser delivers it.
///
/// # Fields
///
/// * `namespace` - Import namespace; empty or absent for local features
/// * `name` - Local feature name (unqualified)
/// * `feature_type` - Value-domain tag (`"Boolean"`, `"Integer"`, `"Real"`,
///   `"String"`); absent means boolean
/// * `lower_bound` / `upper_bound` - Feature cardinality bounds as written
///   in the document, still unparsed
/// * `attributes` - Attribute map, including the `"abstract"` flag
/// * `groups` - Child groups in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvlFeature {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub feature_type: Option<String>,
    #[serde(default)]
    pub lower_bound: Option<String>,
    #[serde(default)]
    pub upper_bound: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default)]
    pub groups: Vec<UvlGroup>,
}

impl UvlFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            feature_type: None,
            lower_bound: None,
            upper_bound: None,
            attributes: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    /// Qualified name: `<namespace>::<local name>` when the namespace is
    /// non-blank, the local name alone otherwise.
    pub fn qualified_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(namespace) if !namespace.trim().is_empty() => format!(
                "{}{}{}",
                namespace,
                config::constants::NAMESPACE_SEPARATOR,
                self.name
            ),
            _ => self.name.clone(),
        }
    }
}

/// A group of sibling features under one parent.
///
/// Bounds are populated for cardinality groups only; the other group kinds
/// imply their own ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UvlGroup {
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub lower_bound: Option<String>,
    #[serde(default)]
    pub upper_bound: Option<String>,
    #[serde(default)]
    pub features: Vec<UvlFeature>,
}

impl UvlGroup {
    pub fn new(group_type: impl Into<String>) -> Self {
        Self {
            group_type: group_type.into(),
            lower_bound: None,
            upper_bound: None,
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<UvlFeature>) -> Self {
        self.features = features;
        self
    }
}
