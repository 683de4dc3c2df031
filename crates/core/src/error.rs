//! Error types for the tokenizer crates.

use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The vocabulary or merge data is missing, malformed or fails to parse.
    #[error("Failed to load tokenizer resources: {0}")]
    ResourceLoad(String),

    /// A merge produced a symbol the vocabulary does not know.
    ///
    /// Indicates a vocabulary/merge-table mismatch, never bad user input.
    #[error("Encoding invariant violated: {0}")]
    Encoding(String),

    /// A token ID with no entry in the vocabulary was passed to `decode`.
    #[error("Unknown token ID: {0}")]
    UnknownToken(u32),

    /// Decoded bytes do not form valid UTF-8 text.
    #[error("Decoded tokens are not valid UTF-8 at byte {offset}: {reason}")]
    MalformedOutput { offset: usize, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Whether the error was caused by caller-supplied input rather than by
    /// the bundled resources.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TokenizerError::UnknownToken(_) | TokenizerError::MalformedOutput { .. }
        )
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
