//! # Config Crate
//!
//! Centralized configuration constants for the UVL pipeline.
//! All magic strings and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{NAMESPACE_SEPARATOR, DEFAULT_FEATURE_UPPER_BOUND};
//!
//! // Qualified feature names join namespace and local name
//! let name = ["server", "Logging"].join(NAMESPACE_SEPARATOR);
//! assert_eq!(name, "server::Logging");
//!
//! // A feature without bounds is selectable at most once
//! assert_eq!(DEFAULT_FEATURE_UPPER_BOUND, 1);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **UVL Compatible**: Defaults match the UVL reference semantics
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
