//! The session service: issue a token for an identity, rotate a token on check.
//!
//! This is the whole behavioural surface of the system. The HTTP handlers
//! decode a request, call one of the two methods here, and encode the result.
//!
//! ## Lifecycle of a token
//!
//! ```text
//! add_session(id) ──→ [issued] ──check_session──→ [issued] + new token
//!                        │                           (Retain)
//!                        └──────check_session──→ [consumed] + new token
//!                                                    (Invalidate)
//! ```
//!
//! There is no expired state. Under `Retain` a token can be checked any
//! number of times, and each check mints another live token.

use signupless_protocol::Identity;
use signupless_token::{Clock, Salt, SystemClock, Token, derive};

use crate::{RotationPolicy, SessionConfig, SessionError, SessionRecord, SessionStore};

/// Issues and rotates session tokens.
///
/// Owns the secret salt, the clock, and the store. Wrap it in an `Arc` to
/// share it between request tasks; every method takes `&self`.
///
/// The salt is handed in at construction and never changes afterwards, so
/// there is no window where a handler can see a missing or default salt.
///
/// ## Type parameter
///
/// `C` is the clock. Production code uses the default [`SystemClock`];
/// tests plug in a clock they control.
pub struct SessionService<C: Clock = SystemClock> {
    salt: Salt,
    clock: C,
    store: SessionStore,
    config: SessionConfig,
}

impl SessionService<SystemClock> {
    /// Creates a service on the system clock.
    pub fn new(salt: Salt, config: SessionConfig) -> Self {
        Self::with_clock(salt, SystemClock::new(), config)
    }
}

impl<C: Clock> SessionService<C> {
    /// Creates a service with an explicit clock.
    pub fn with_clock(salt: Salt, clock: C, config: SessionConfig) -> Self {
        Self {
            salt,
            clock,
            store: SessionStore::new(),
            config,
        }
    }

    /// Registers `identity` and issues its first token.
    ///
    /// # Errors
    /// - [`SessionError::EmptyIdentity`] if `identity` is the empty string
    /// - [`SessionError::TokenCollision`] if the derived token is already
    ///   bound (only with a clock that repeats itself)
    pub async fn add_session(&self, identity: Identity) -> Result<SessionRecord, SessionError> {
        if identity.is_empty() {
            return Err(SessionError::EmptyIdentity);
        }

        let token = self.issue_token();
        self.store.put(token.clone(), identity.clone()).await?;

        tracing::info!(%identity, token = token.short(), "session added");
        Ok(SessionRecord { identity, token })
    }

    /// Checks a presented token and rotates it.
    ///
    /// The format check runs first and never touches the store, so garbage
    /// input costs no lock. A well-formed token that isn't in the store is
    /// an authorization failure.
    ///
    /// On success the returned record carries the same identity and a new
    /// token. Whether `presented` stays valid depends on
    /// [`SessionConfig::rotation`].
    ///
    /// # Errors
    /// - [`SessionError::InvalidTokenFormat`] if `presented` isn't 64
    ///   lowercase hex characters
    /// - [`SessionError::UnknownToken`] if it's well-formed but not live
    /// - [`SessionError::TokenCollision`] if the new token is already bound
    pub async fn check_session(&self, presented: &str) -> Result<SessionRecord, SessionError> {
        let presented = Token::parse(presented).map_err(SessionError::InvalidTokenFormat)?;

        let (identity, token) = match self.config.rotation {
            RotationPolicy::Retain => {
                let identity = self
                    .store
                    .get(&presented)
                    .await
                    .ok_or(SessionError::UnknownToken)?;
                let token = self.issue_token();
                self.store.put(token.clone(), identity.clone()).await?;
                (identity, token)
            }
            RotationPolicy::Invalidate => {
                let token = self.issue_token();
                let identity = self.store.replace(&presented, token.clone()).await?;
                (identity, token)
            }
        };

        tracing::info!(
            %identity,
            presented = presented.short(),
            token = token.short(),
            "session rotated"
        );
        Ok(SessionRecord { identity, token })
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Derives a token from the salt and the next clock reading.
    /// Pure computation; called before any store lock is taken.
    fn issue_token(&self) -> Token {
        derive(&self.salt, self.clock.now_nanos())
    }
}

// =========================================================================
// Tests
// =========================================================================
