// Main entry point for the blogcast server

use anyhow::{Context, Result};
use blogcast::kernel::ServerDeps;
use blogcast::server::{build_app, SessionOptions};
use blogcast::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blogcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting blogcast");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        announcing = config.twitter.is_some(),
        redirect_uri = %config.google.redirect_uri,
        "Configuration loaded"
    );

    let deps = ServerDeps::from_config(&config).context("Failed to build dependencies")?;
    let app = build_app(deps, SessionOptions::from(&config));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Sign in: http://localhost:{}/login", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
