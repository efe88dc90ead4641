//! Error types for the protocol layer.
//!
//! Each crate in Signupless defines its own error enum. A `ProtocolError`
//! means the problem is in turning bodies into bytes or back, not in the
//! session logic.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a response into bytes).
    ///
    /// This is a server-side fault: the server built a value it can't
    /// render. It surfaces as a 500.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a request body into a type).
    ///
    /// Common causes: malformed JSON, a missing `id` field, or `id` not
    /// being a string. This is the client's fault and surfaces as a 400.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
