//! Token derivation: `hex(SHA3-256(salt ++ hex(timestamp)))`.
//!
//! Derivation is a pure function. The same salt and timestamp always give
//! the same token, which is what lets the golden-vector tests below pin the
//! exact output. It also means the timestamp is the only thing that makes
//! two tokens from the same process differ. [`SystemClock`](crate::SystemClock)
//! never hands out the same nanosecond twice for that reason.

use sha3::{Digest, Sha3_256};

use crate::Token;

/// Renders a nanosecond timestamp as lowercase hex with no padding.
///
/// Leading zeros are dropped, so the width varies. Negative values render
/// as a minus sign followed by the magnitude (`-1` → `"-1"`), not as the
/// two's-complement bit pattern `{:x}` would give for an `i64`.
pub fn hex_timestamp(timestamp_nanos: i64) -> String {
    if timestamp_nanos < 0 {
        format!("-{:x}", timestamp_nanos.unsigned_abs())
    } else {
        format!("{timestamp_nanos:x}")
    }
}

/// Derives a token from a salt and a nanosecond timestamp.
///
/// The digest input is the salt's raw bytes followed by the bytes of
/// [`hex_timestamp`]. No separator: the salt is fixed for the process, so
/// there is no ambiguity to guard against.
///
/// ```rust
/// use signupless_token::{derive, validate_format};
///
/// let token = derive("some-salt", 1_678_622_811_691_240_000);
/// assert!(validate_format(token.as_str()));
/// ```
pub fn derive(salt: impl AsRef<[u8]>, timestamp_nanos: i64) -> Token {
    let mut hasher = Sha3_256::new();
    hasher.update(salt.as_ref());
    hasher.update(hex_timestamp(timestamp_nanos).as_bytes());
    Token::from_digest_hex(hex::encode(hasher.finalize()))
}
