use crate::diagnostic::Diagnostic;
use thiserror::Error;

/// Errors that can terminate a top-level translation.
#[derive(Debug, Error)]
pub enum UvlError {
    /// A pass hit a fatal condition; carries every diagnostic accumulated
    /// up to and including the fatal one.
    #[error("translation failed with {} diagnostic(s)", .0.len())]
    Model(Vec<Diagnostic>),
}

impl UvlError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            UvlError::Model(diagnostics) => diagnostics,
        }
    }
}

/// Marker for an aborted traversal. The details live in the diagnostics
/// list the caller passed in; the marker only short-circuits the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted;
