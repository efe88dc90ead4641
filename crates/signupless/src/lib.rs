//! # Signupless
//!
//! Rotating bearer session tokens over HTTP.
//!
//! A client registers an identity with `POST /session/add` and receives a
//! token. Presenting that token to `POST /session/check` (in the
//! `session-token` header) returns the identity together with a freshly
//! minted token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signupless::prelude::*;
//!
//! # async fn start() -> Result<(), SignuplessError> {
//! let salt = Salt::provision()?;
//! let server = SignuplessServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build(salt)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::SignuplessError;
pub use server::{DEFAULT_PORT, SignuplessServer, SignuplessServerBuilder};

/// Everything needed to embed or talk to a Signupless server.
pub mod prelude {
    pub use crate::{DEFAULT_PORT, SignuplessError, SignuplessServer, SignuplessServerBuilder};
    pub use signupless_protocol::{
        AddSessionRequest, ErrorResponse, Identity, SESSION_TOKEN_HEADER, SessionResponse,
    };
    pub use signupless_session::{RotationPolicy, SessionConfig};
    pub use signupless_token::{Clock, Salt, SystemClock, Token, validate_format};
}
