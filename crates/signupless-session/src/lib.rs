//! Session issuance and rotation for Signupless.
//!
//! This crate owns the token lifecycle:
//!
//! 1. **Issuance**: a client registers an identity and gets a token
//!    ([`SessionService::add_session`])
//! 2. **Rotation**: a client presents a token, and if it's live, gets the
//!    identity back plus a fresh token ([`SessionService::check_session`])
//! 3. **Storage**: the concurrent token → identity map behind both
//!    ([`SessionStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP Layer (above)  ← decodes requests, maps SessionError to status codes
//!     ↕
//! Session Layer (this crate)  ← issues, looks up, and rotates tokens
//!     ↕
//! Token Layer (below)  ← derives and validates tokens
//! ```

mod error;
mod service;
mod session;
mod store;

pub use error::SessionError;
pub use service::SessionService;
pub use session::{RotationPolicy, SessionConfig, SessionRecord};
pub use store::SessionStore;
