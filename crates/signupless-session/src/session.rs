//! Session types: configuration and the record handed back to callers.

use signupless_protocol::{Identity, SessionResponse};
use signupless_token::Token;

// ---------------------------------------------------------------------------
// RotationPolicy
// ---------------------------------------------------------------------------

/// What happens to the presented token when a check succeeds.
///
/// ```text
///   Retain:      issued ──check──→ issued (old) + issued (new)
///   Invalidate:  issued ──check──→ consumed (old) + issued (new)
/// ```
///
/// `Retain` is the default and the historical behaviour: a token stays
/// valid forever, every check mints another one, and the store only grows.
/// `Invalidate` turns rotation into true single-use tokens, so a replayed
/// token is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Keep the presented token live after a successful check.
    #[default]
    Retain,

    /// Remove the presented token in the same store transaction that
    /// inserts its replacement.
    Invalidate,
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// Sensible defaults are provided; override only the fields you care about:
///
/// ```rust
/// use signupless_session::{RotationPolicy, SessionConfig};
///
/// let config = SessionConfig {
///     rotation: RotationPolicy::Invalidate,
///     ..SessionConfig::default()
/// };
/// assert_eq!(config.rotation, RotationPolicy::Invalidate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Whether a successful check consumes the presented token.
    pub rotation: RotationPolicy,
}

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// The result of issuing or rotating a token: who it belongs to and the
/// token the client should present next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub identity: Identity,
    pub token: Token,
}

impl From<SessionRecord> for SessionResponse {
    fn from(record: SessionRecord) -> Self {
        SessionResponse {
            id: record.identity,
            token: record.token,
        }
    }
}
