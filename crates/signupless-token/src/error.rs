//! Error types for the token layer.

/// Errors that can occur while parsing tokens or provisioning a salt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The string is not exactly [`TOKEN_LEN`](crate::TOKEN_LEN) bytes long.
    #[error("token must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The string contains a byte outside `[a-f0-9]`.
    ///
    /// Uppercase hex is rejected too: tokens are always issued lowercase,
    /// so an uppercase token was never issued by us.
    #[error("token contains invalid character at position {position}")]
    InvalidCharacter { position: usize },

    /// The operating system's random source could not be read.
    ///
    /// This is fatal at startup. Without entropy the salt is guessable and
    /// every token derived from it would be too.
    #[error("secure random source unavailable: {0}")]
    Entropy(String),
}
