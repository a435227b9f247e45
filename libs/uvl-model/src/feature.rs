//! # Features
//!
//! A feature is a named configurable unit of a variability model. Features
//! are owned by the [`FeatureModel`](crate::tree::FeatureModel) and referenced
//! (never owned) by feature-tree nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value domain of a feature.
///
/// External documents carry the domain as a textual type tag; absent tags
/// default to [`FeatureType::Bool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FeatureType {
    #[default]
    Bool,
    Integer,
    Real,
    String,
}

impl FeatureType {
    /// Maps an external type tag to a value domain.
    ///
    /// Returns `None` for unrecognized tags; the caller reports those as
    /// domain errors.
    pub fn from_tag(tag: Option<&str>) -> Option<Self> {
        match tag {
            None => Some(FeatureType::Bool),
            Some("Boolean") => Some(FeatureType::Bool),
            Some("Integer") => Some(FeatureType::Integer),
            Some("Real") => Some(FeatureType::Real),
            Some("String") => Some(FeatureType::String),
            Some(_) => None,
        }
    }

    /// The external type tag for this value domain.
    pub fn tag(&self) -> &'static str {
        match self {
            FeatureType::Bool => "Boolean",
            FeatureType::Integer => "Integer",
            FeatureType::Real => "Real",
            FeatureType::String => "String",
        }
    }
}

/// An attribute value attached to a feature.
///
/// Attributes are open-ended string-keyed typed values; the model does not
/// interpret them except for the reserved abstract flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
}

/// A named configurable unit of a variability model.
///
/// Identity is the qualified name: `<namespace>::<local name>` when a
/// namespace is present, the local name alone otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Qualified name, unique within one model.
    pub name: String,
    pub feature_type: FeatureType,
    /// Abstract features structure the tree but are not independently
    /// selectable.
    pub is_abstract: bool,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_type: FeatureType::Bool,
            is_abstract: false,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = feature_type;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }
}
