//! Session token primitives for Signupless.
//!
//! This crate is the bottom of the stack. It knows nothing about HTTP or
//! sessions; it only knows how tokens are made and what they look like:
//!
//! - **Derivation** ([`derive`]): SHA3-256 over a secret salt and a
//!   nanosecond timestamp, rendered as 64 lowercase hex characters.
//! - **Format** ([`Token`], [`validate_format`]): the `^[a-f0-9]{64}$`
//!   shape every issued token has.
//! - **Salt** ([`Salt`]): the process-wide secret mixed into every token.
//! - **Clock** ([`Clock`], [`SystemClock`]): where the timestamps come from.
//!
//! ```text
//! Session Layer (above)  ← issues and rotates tokens
//!     ↕
//! Token Layer (this crate)  ← derives and validates tokens
//! ```

mod clock;
mod derive;
mod error;
mod salt;
mod token;

pub use clock::{Clock, SystemClock, unix_nanos};
pub use derive::{derive, hex_timestamp};
pub use error::TokenError;
pub use salt::{SALT_RANDOM_BYTES, Salt};
pub use token::{TOKEN_LEN, Token, validate_format};
