//! The session store: every live token and the identity it authorizes.
//!
//! # Concurrency note
//!
//! Unlike a single-owner registry, this store is shared by every request
//! task at once, so it carries its own lock. A `tokio::sync::RwLock` lets
//! concurrent lookups proceed together while inserts and removals take
//! turns. Critical sections are a single `HashMap` operation; token
//! derivation (the only real work) always happens before the lock is taken.
//!
//! Nothing is ever evicted. With [`RotationPolicy::Retain`](crate::RotationPolicy)
//! the map grows by one entry per add and per check for the life of the
//! process.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use signupless_protocol::Identity;
use signupless_token::Token;
use tokio::sync::RwLock;

use crate::SessionError;

/// Concurrent mapping from token to identity.
///
/// Keys are [`Token`]s, which can only exist in the well-formed
/// 64-lowercase-hex shape, so every key in the store is well-formed too.
///
/// Many tokens may map to the same identity; there is no reverse index.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Token, Identity>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token` to `identity`.
    ///
    /// # Errors
    /// Returns [`SessionError::TokenCollision`] if the token is already
    /// bound. The existing binding is left untouched.
    pub async fn put(&self, token: Token, identity: Identity) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        match sessions.entry(token) {
            Entry::Occupied(_) => Err(SessionError::TokenCollision),
            Entry::Vacant(slot) => {
                slot.insert(identity);
                Ok(())
            }
        }
    }

    /// Looks up the identity bound to `token`.
    pub async fn get(&self, token: &Token) -> Option<Identity> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Atomically moves a session from `old` to `new`.
    ///
    /// Both halves happen under one write lock, so two concurrent callers
    /// presenting the same `old` token can't both succeed.
    ///
    /// # Errors
    /// - [`SessionError::UnknownToken`] if `old` isn't bound
    /// - [`SessionError::TokenCollision`] if `new` is already bound; `old`
    ///   stays bound in that case
    pub async fn replace(&self, old: &Token, new: Token) -> Result<Identity, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&new) {
            return Err(SessionError::TokenCollision);
        }
        let identity = sessions.remove(old).ok_or(SessionError::UnknownToken)?;
        sessions.insert(new, identity.clone());
        Ok(identity)
    }

    /// Returns the number of live tokens.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no tokens have been issued.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
