//! `SignuplessServer` builder and server loop.
//!
//! This is the entry point for running a Signupless server. It ties the
//! layers together: HTTP (axum) → protocol → session → token.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use signupless_protocol::JsonCodec;
use signupless_session::{SessionConfig, SessionService};
use signupless_token::{Clock, Salt, SystemClock};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::SignuplessError;
use crate::handler;

/// Port the binary listens on when none is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared server state passed to each request handler.
///
/// Wrapped in `Arc` so it can be cheaply cloned into every request. The
/// session service carries its own synchronization, so no outer lock.
pub(crate) struct ServerState<C: Clock> {
    pub(crate) sessions: SessionService<C>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Signupless server.
///
/// # Example
///
/// ```rust,ignore
/// use signupless::prelude::*;
///
/// let server = SignuplessServer::builder()
///     .bind("0.0.0.0:8080")
///     .session_config(SessionConfig { rotation: RotationPolicy::Invalidate })
///     .build(Salt::provision()?)
///     .await?;
/// server.run().await
/// ```
pub struct SignuplessServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
}

impl SignuplessServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: format!("127.0.0.1:{DEFAULT_PORT}"),
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Binds the listener and builds the server on the system clock.
    ///
    /// The salt is moved into the server here. This is the only place it
    /// is assigned, and it happens before any request can be accepted.
    pub async fn build(self, salt: Salt) -> Result<SignuplessServer, SignuplessError> {
        self.build_with_clock(salt, SystemClock::new()).await
    }

    /// Like [`build`](Self::build) with an explicit clock.
    pub async fn build_with_clock<C: Clock>(
        self,
        salt: Salt,
        clock: C,
    ) -> Result<SignuplessServer<C>, SignuplessError> {
        let listener =
            TcpListener::bind(&self.bind_addr)
                .await
                .map_err(|source| SignuplessError::Bind {
                    addr: self.bind_addr.clone(),
                    source,
                })?;

        let state = Arc::new(ServerState {
            sessions: SessionService::with_clock(salt, clock, self.session_config),
            codec: JsonCodec,
        });

        Ok(SignuplessServer { listener, state })
    }
}

impl Default for SignuplessServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Signupless server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct SignuplessServer<C: Clock = SystemClock> {
    listener: TcpListener,
    state: Arc<ServerState<C>>,
}

impl SignuplessServer<SystemClock> {
    /// Creates a new builder.
    pub fn builder() -> SignuplessServerBuilder {
        SignuplessServerBuilder::new()
    }
}

impl<C: Clock> SignuplessServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the process is terminated.
    pub async fn run(self) -> Result<(), SignuplessError> {
        self.run_until(std::future::pending()).await
    }

    /// Serves requests until `shutdown` completes, then drains in-flight
    /// requests and returns.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), SignuplessError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(Arc::clone(&self.state));
        tracing::info!(
            rotation = ?self.state.sessions.config().rotation,
            "Signupless server running"
        );

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(SignuplessError::Serve)
    }
}

/// Builds the full application router for `state`.
pub(crate) fn router<C: Clock>(state: Arc<ServerState<C>>) -> Router {
    let routes = Router::new()
        .route("/session/add", post(handler::add_session::<C>))
        .route("/session/check", post(handler::check_session::<C>))
        .with_state(state);
    with_middleware(routes)
}

/// Wraps `routes` in the per-request boundary: tracing on the outside,
/// panic recovery inside it, so a panicking request is still traced as a 500.
pub(crate) fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handler::panic_response))
        .layer(TraceLayer::new_for_http())
}
