//! Setup errors
//!
//! A feature whose setup fails is skipped; the error is only logged.

use folio_runtime::RuntimeError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    #[error("Counter text `{0}` has no number")]
    UnparsableCounter(String),

    #[error("Typewriter has no phrases")]
    NoPhrases,

    #[error("{0} is disabled on touch devices")]
    TouchDevice(&'static str),

    #[error(transparent)]
    Observer(#[from] RuntimeError),
}
