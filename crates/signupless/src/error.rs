//! Unified error type for the Signupless server, and its HTTP mapping.
//!
//! Every handler returns `Result<Response, SignuplessError>`. The
//! [`IntoResponse`] impl below is the one place errors become status codes,
//! get logged, and get rendered as `{"error": {"code", "message"}}`.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use signupless_protocol::{Codec, ErrorResponse, JsonCodec, ProtocolError};
use signupless_session::SessionError;
use signupless_token::TokenError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each wrapping variant generates a `From`
/// impl, so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SignuplessError {
    /// A token-level error outside a request, in practice salt provisioning.
    /// Malformed client tokens arrive as [`SessionError::InvalidTokenFormat`].
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A protocol-level error (request decode, response encode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (empty identity, unknown token, collision).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The listener couldn't bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// A request handler panicked. The panic was contained to that request.
    #[error("handler panicked: {0}")]
    Panic(String),
}

impl SignuplessError {
    /// The HTTP status this error surfaces as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Protocol(ProtocolError::Decode(_)) => StatusCode::BAD_REQUEST,
            Self::Protocol(ProtocolError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Session(SessionError::EmptyIdentity)
            | Self::Session(SessionError::InvalidTokenFormat(_)) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::UnknownToken) => StatusCode::FORBIDDEN,
            Self::Token(_)
            | Self::Session(SessionError::TokenCollision)
            | Self::Bind { .. }
            | Self::Serve(_)
            | Self::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the client is told. Forbidden and internal errors say nothing
    /// about the cause.
    fn public_message(&self) -> String {
        let status = self.status_code();
        if status == StatusCode::BAD_REQUEST {
            self.to_string()
        } else if status == StatusCode::FORBIDDEN {
            "forbidden".to_string()
        } else {
            "internal server error".to_string()
        }
    }
}

impl IntoResponse for SignuplessError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
            "INTERNAL_ERROR"
        } else if status == StatusCode::FORBIDDEN {
            tracing::warn!(error = %self, %status, "request refused");
            "FORBIDDEN"
        } else {
            tracing::info!(error = %self, %status, "request rejected");
            "BAD_REQUEST"
        };

        let body = ErrorResponse::new(code, self.public_message());
        match JsonCodec.encode(&body) {
            Ok(bytes) => (
                status,
                [(header::CONTENT_TYPE, JsonCodec::CONTENT_TYPE)],
                bytes,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode error body");
                status.into_response()
            }
        }
    }
}
