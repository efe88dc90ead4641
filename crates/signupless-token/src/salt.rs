//! The process-wide secret salt.
//!
//! Every token is `SHA3-256(salt ++ timestamp)`. Timestamps are guessable,
//! so the salt is the only thing standing between a client and forging
//! someone else's token. It is generated once at startup from the OS random
//! source and never leaves the process.

use std::fmt;

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::{TokenError, hex_timestamp, unix_nanos};

/// How many random bytes go into a provisioned salt.
pub const SALT_RANDOM_BYTES: usize = 16;

/// Secret input to token derivation.
///
/// Holds the salt as text: the startup timestamp in hex followed by the
/// random bytes in hex, e.g. `174baa8db2b92718` + `a0099507b18702f7a1c1a3c3397e5b0b`.
/// The timestamp adds no real entropy (an attacker can guess when the
/// server started); the 128 random bits carry all of it.
///
/// `Debug` is implemented by hand so the salt can't leak through a stray
/// `{:?}` in a log line. It has no `Display` or `Serialize` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Generates a fresh salt from the operating system's CSPRNG.
    ///
    /// Uses the fallible `OsRng` API rather than `rand::rng()` so a broken
    /// random source surfaces as an error instead of a panic deep inside
    /// the RNG.
    ///
    /// # Errors
    /// Returns [`TokenError::Entropy`] if the OS random source can't be read.
    /// Callers must treat this as fatal and refuse to serve.
    pub fn provision() -> Result<Self, TokenError> {
        let mut bytes = [0u8; SALT_RANDOM_BYTES];
        let mut rng = OsRng;
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::Entropy(e.to_string()))?;

        let salt = format!("{}{}", hex_timestamp(unix_nanos()), hex::encode(bytes));
        tracing::debug!(len = salt.len(), "salt provisioned");
        Ok(Self(salt))
    }

    /// Builds a salt from known text.
    ///
    /// For tests and for reproducing tokens from a recorded salt. A server
    /// should always use [`Salt::provision`].
    pub fn from_string(salt: impl Into<String>) -> Self {
        Self(salt.into())
    }

    /// Length of the salt text in bytes.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[u8]> for Salt {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Salt").field(&"<redacted>").finish()
    }
}
