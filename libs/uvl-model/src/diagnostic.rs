use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Malformed model shape: missing names, missing or unknown group kinds,
    /// connectives the constraint grammar cannot express, illegal qualified
    /// names, duplicate features.
    Structural,
    /// Unrecognized value-domain tag or a bound that is not an integer.
    Domain,
    /// A group cardinality that cannot be constructed, such as a
    /// cardinality group missing its lower bound.
    Cardinality,
    /// More than one root feature where exactly one is required.
    MultiRoot,
}

/// A diagnostic message with severity and the feature it concerns.
///
/// Diagnostics accumulate across an entire translation pass; recoverable
/// conditions never abort on their own, and a fatal condition surfaces every
/// diagnostic collected up to that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Qualified name of the feature the diagnostic refers to, if any.
    pub feature: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            feature: None,
        }
    }

    pub fn with_feature(mut self, name: impl Into<String>) -> Self {
        self.feature = Some(name.into());
        self
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, kind, message)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.feature {
            Some(name) => write!(f, "{:?}: {} ({})", self.severity, self.message, name),
            None => write!(f, "{:?}: {}", self.severity, self.message),
        }
    }
}
