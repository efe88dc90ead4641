//! `signupless` binary: provisions a salt, binds, and serves until signalled.

use anyhow::Context;
use clap::Parser;
use signupless::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "signupless")]
#[command(version, about = "Rotating bearer session tokens over HTTP", long_about = None)]
struct Cli {
    /// Interface to listen on
    #[arg(long, env = "SIGNUPLESS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// TCP port to listen on
    #[arg(long, env = "SIGNUPLESS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Consume a token when it is checked instead of leaving it valid
    #[arg(long, env = "SIGNUPLESS_SINGLE_USE")]
    single_use: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signupless=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // No salt, no service.
    let salt = Salt::provision().context("failed to provision session salt")?;

    let rotation = if cli.single_use {
        RotationPolicy::Invalidate
    } else {
        RotationPolicy::Retain
    };
    let addr = format!("{}:{}", cli.host, cli.port);

    let server = SignuplessServer::builder()
        .bind(&addr)
        .session_config(SessionConfig { rotation })
        .build(salt)
        .await?;
    tracing::info!(addr = %server.local_addr()?, "listening");

    server.run_until(shutdown_signal()).await?;
    tracing::info!("shut down");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
