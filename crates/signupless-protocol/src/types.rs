//! Request and response bodies for the Signupless HTTP API.
//!
//! ```text
//! POST /session/add     {"id": "..."}               → {"id": "...", "token": "..."}
//! POST /session/check   session-token: <64 hex>     → {"id": "...", "token": "<new>"}
//! any error                                         → {"error": {"code": "...", "message": "..."}}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use signupless_token::Token;

/// Name of the request header carrying the token on `/session/check`.
pub const SESSION_TOKEN_HEADER: &str = "session-token";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The client-chosen identity a session belongs to.
///
/// Opaque to the server: any string the client sends. The session layer
/// rejects the empty string, nothing else.
///
/// `#[serde(transparent)]` keeps it a bare string in JSON, so
/// `Identity("alice")` is just `"alice"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// Body of `POST /session/add`.
///
/// Unknown fields are ignored. A missing `id` fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSessionRequest {
    pub id: Identity,
}

/// Successful response from both endpoints: who the session belongs to and
/// the token to present next time.
///
/// `token` deserializes through [`Token`]'s format check, so a client
/// decoding this type gets a validated token for free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Identity,
    pub token: Token,
}

/// Error response body: `{"error": {"code": "FORBIDDEN", "message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// The inside of an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code: `BAD_REQUEST`, `FORBIDDEN`, `INTERNAL_ERROR`.
    pub code: String,
    /// Human-readable detail. Never says why a token was refused.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
