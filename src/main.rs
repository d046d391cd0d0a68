mod api;
mod auth;
mod config;
mod error;
mod evidence;
mod geocode;
mod models;
mod observability;
mod service;
mod state;
mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::auth::AuthKeys;
use crate::evidence::fs::FsEvidenceStore;
use crate::geocode::NominatimGeocoder;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let evidence = Arc::new(FsEvidenceStore::new(&config.upload_dir));
    let geocoder = Arc::new(
        NominatimGeocoder::new(
            config.geocode_url.clone(),
            Duration::from_secs(config.geocode_timeout_secs),
        )
        .map_err(|err| error::AppError::Internal(err.to_string()))?,
    );
    let auth_keys = AuthKeys::new(&config.auth_secret, config.token_ttl_minutes);

    let shared_state = Arc::new(state::AppState::new(
        evidence,
        geocoder,
        auth_keys,
        config.upload_dir.clone().into(),
    ));

    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
