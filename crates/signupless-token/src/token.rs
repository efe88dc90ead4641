//! The [`Token`] type and its format check.
//!
//! A token is the only credential a client holds. The server never stores
//! anything else about it: the token string itself is the key into the
//! session store. That makes the format check cheap and important. A string
//! that can't possibly be a token is rejected before anyone takes a lock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TokenError;

/// Length of every token, in characters: a 32-byte digest rendered as hex.
pub const TOKEN_LEN: usize = 64;

/// Returns `true` if `candidate` matches `^[a-f0-9]{64}$`.
///
/// Works on bytes rather than chars: a multi-byte UTF-8 character can never
/// be a hex digit, so the first byte of one fails the check the same way.
pub fn validate_format(candidate: &str) -> bool {
    check(candidate).is_ok()
}

fn check(candidate: &str) -> Result<(), TokenError> {
    if candidate.len() != TOKEN_LEN {
        return Err(TokenError::InvalidLength {
            expected: TOKEN_LEN,
            actual: candidate.len(),
        });
    }
    match candidate
        .bytes()
        .position(|b| !matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        Some(position) => Err(TokenError::InvalidCharacter { position }),
        None => Ok(()),
    }
}

/// A well-formed session token: 64 lowercase hex characters.
///
/// There are exactly two ways to get one:
/// - [`derive`](crate::derive) produces it from a salt and a timestamp.
/// - [`Token::parse`] (or `str::parse`) checks a client-supplied string.
///
/// Both guarantee the format, so anything holding a `Token` can rely on it.
/// The session store is keyed by `Token`, which is how "every key in the
/// store is well-formed" holds without the store checking anything.
///
/// `#[serde(try_from = "String")]` runs the same check on deserialization,
/// so a malformed token in JSON fails to decode instead of sneaking in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Parses a client-supplied string, checking the token format.
    ///
    /// # Errors
    /// - [`TokenError::InvalidLength`] if the length isn't 64
    /// - [`TokenError::InvalidCharacter`] if a byte isn't `[a-f0-9]`
    pub fn parse(candidate: &str) -> Result<Self, TokenError> {
        check(candidate)?;
        Ok(Self(candidate.to_owned()))
    }

    /// Wraps a freshly hex-encoded digest. Only the codec calls this.
    pub(crate) fn from_digest_hex(hex: String) -> Self {
        debug_assert!(validate_format(&hex));
        Self(hex)
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for log lines. Full tokens are credentials
    /// and never go to the log.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check(&value)?;
        Ok(Self(value))
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
