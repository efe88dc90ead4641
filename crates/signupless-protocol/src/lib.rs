//! Wire protocol for Signupless.
//!
//! This crate defines what travels over HTTP:
//!
//! - **Types** ([`AddSessionRequest`], [`SessionResponse`], [`ErrorResponse`],
//!   [`Identity`]): the JSON bodies clients send and receive.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong doing so.
//!
//! # Architecture
//!
//! The protocol layer sits between HTTP (raw bytes) and the session layer
//! (identities and tokens). It doesn't know about routes or stores.
//!
//! ```text
//! HTTP (bytes) → Protocol (typed bodies) → Session (issue / rotate)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AddSessionRequest, ErrorBody, ErrorResponse, Identity, SESSION_TOKEN_HEADER,
    SessionResponse,
};
