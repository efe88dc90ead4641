//! Error types for the session layer.

use signupless_token::TokenError;

/// Errors that can occur while issuing or rotating a session token.
///
/// The HTTP layer maps each variant to a status code: the first two are the
/// client's fault (400), `UnknownToken` is an authorization failure (403),
/// and `TokenCollision` is ours (500).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// `add_session` was called with an empty identity.
    #[error("identity must not be empty")]
    EmptyIdentity,

    /// The presented token isn't 64 lowercase hex characters.
    ///
    /// Raised before the store is consulted, so it says nothing about
    /// which tokens exist.
    #[error("malformed session token: {0}")]
    InvalidTokenFormat(#[source] TokenError),

    /// The presented token is well-formed but not in the store.
    ///
    /// Carries no detail. A token that was never issued and one consumed
    /// by a single-use rotation look the same from outside.
    #[error("unknown session token")]
    UnknownToken,

    /// A freshly derived token is already in the store.
    ///
    /// Only possible if two derivations saw the same salt and timestamp.
    /// The store refuses the insert so an existing session is never
    /// silently handed to another identity.
    #[error("derived token already in use")]
    TokenCollision,
}
