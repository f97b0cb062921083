use thiserror::Error;

/// Errors surfaced by a simulation engine adapter.
///
/// Only `Session` is fatal to a run; everything else is recovered at the case
/// boundary and recorded as a failed case result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("engine session initialization failed: {0}")]
    Session(String),

    #[error("flowsheet construction rejected while {context}: {message}")]
    Build {
        context: &'static str,
        message: String,
    },

    #[error("solver did not converge: {0}")]
    Convergence(String),

    #[error("result '{property}' unavailable on '{object}': {message}")]
    Extraction {
        object: String,
        property: String,
        message: String,
    },

    #[error("unknown flowsheet object: {0}")]
    UnknownObject(String),
}
