//! # Configuration Constants
//!
//! Centralized constants for the UVL pipeline. Naming conventions, default
//! cardinality bounds, and format-registry identity are defined here.
//!
//! ## Categories
//!
//! - **Naming**: Namespace qualification and reserved attribute keys
//! - **Cardinality**: Default bounds for feature ranges
//! - **Format**: File-format identity for the host format registry

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Separator between a namespace and a local feature name.
///
/// A feature imported from a namespace is addressed by its qualified name,
/// `<namespace>::<local name>`. A feature without a namespace uses its local
/// name alone, so a qualified name contains this separator at most once.
///
/// # Example
///
/// ```rust
/// use config::constants::NAMESPACE_SEPARATOR;
///
/// let qualified = format!("server{}{}", NAMESPACE_SEPARATOR, "Logging");
/// assert_eq!(qualified, "server::Logging");
/// ```
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Attribute key carrying the abstract flag of a feature.
///
/// UVL models abstractness as an ordinary feature attribute; the internal
/// feature model carries it as a dedicated flag. The bridge translates
/// between the two using this key and must not copy it twice.
pub const ABSTRACT_ATTRIBUTE: &str = "abstract";

/// Name of the synthetic root feature used when serializing a bare formula.
///
/// A formula has no feature tree of its own, so the formula format emits a
/// document with one abstract root of this name holding all variables.
pub const FORMULA_ROOT_NAME: &str = "Formula";

// =============================================================================
// CARDINALITY CONSTANTS
// =============================================================================

/// Default upper bound for a feature range when the document gives none.
///
/// A feature without explicit bounds is an ordinary singleton feature:
/// selectable at most once.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_FEATURE_UPPER_BOUND;
///
/// let upper: Option<u64> = None;
/// assert_eq!(upper.unwrap_or(DEFAULT_FEATURE_UPPER_BOUND), 1);
/// ```
pub const DEFAULT_FEATURE_UPPER_BOUND: u64 = 1;

// =============================================================================
// FORMAT CONSTANTS
// =============================================================================

/// File extension identifying the format to the host format registry.
pub const FILE_EXTENSION: &str = "uvl";

/// Human-readable name of the format.
pub const FORMAT_NAME: &str = "Universal Variability Language";
