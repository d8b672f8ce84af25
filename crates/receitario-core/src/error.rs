use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating the recipe dataset.
#[derive(Debug, Error)]
pub enum ReceitarioError {
    /// The raw recipe file is missing or unreadable.
    #[error("cannot read recipe file {path:?}: {source}")]
    InputNotFound {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The input is not a JSON array of recipe objects.
    #[error("malformed recipe input: {reason}")]
    MalformedInput {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// A single recipe record is missing a field or has a wrong-typed one.
    #[error("recipe #{index} ({}) is malformed: {source}", title.as_deref().unwrap_or("untitled"))]
    MalformedRecipe {
        /// 1-based position in the input array.
        index: usize,
        /// Title, when the record had a readable `titulo`.
        title: Option<String>,
        /// Deserialization failure.
        source: serde_json::Error,
    },

    /// The generated module could not be written.
    #[error("cannot write dataset module to {path:?}: {source}")]
    OutputWriteFailure {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The enrichment rule table is inconsistent.
    #[error("invalid enrichment rules: {0}")]
    InvalidRules(String),

    /// A record did not match the declared output shape.
    #[error("field `{field}` does not match the record shape (expected {expected})")]
    ShapeMismatch {
        /// Field name from the shape table.
        field: &'static str,
        /// Declared type of the field.
        expected: &'static str,
    },

    /// A configured name cannot be used as a TypeScript identifier.
    #[error("`{0}` is not a valid TypeScript identifier")]
    InvalidIdentifier(String),

    /// A record could not be converted into the emitter's value model.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for receitario operations.
pub type Result<T> = std::result::Result<T, ReceitarioError>;
