//! Error types for parsing and JSON conversion.

use thiserror::Error;

/// Errors surfaced by this crate.
///
/// All grammar violations come out as [`SimclassError::Parse`] with the
/// cursor position (in Unicode scalar values from the start of the input) and
/// a snippet of the input following that position. The generator is total and
/// never produces an error.
#[derive(Error, Debug)]
pub enum SimclassError {
    /// The input violated the class-file grammar.
    #[error("{message} at position {position}. Before: {context}")]
    Parse {
        message: String,
        position: usize,
        /// Up to 50 scalars of input starting at the failure position.
        context: String,
    },

    /// A value with no class-file representation was fed to the JSON
    /// conversion layer (e.g. `null` inside the input JSON).
    #[error("cannot represent {0} in a class file")]
    Unrepresentable(String),

    /// The input string was not valid JSON (conversion path).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout simclass-core.
pub type Result<T> = std::result::Result<T, SimclassError>;
