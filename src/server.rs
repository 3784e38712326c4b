//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, service wiring, and the Axum server lifecycle.

use crate::application::services::BasketService;
use crate::config::Config;
use crate::infrastructure::persistence::{BasketTtl, StoreBasketRepository};
use crate::infrastructure::store::{
    BasketStore, InMemoryBasketStore, RedisBasketStore, spawn_sweeper,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Basket store (Redis, or the in-memory store with its expiry sweeper)
/// - Basket repository and service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable after all connection attempts
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let repository = Arc::new(StoreBasketRepository::new(
        store.clone(),
        BasketTtl::from_secs(config.basket_ttl_seconds),
    ));
    let basket_service = Arc::new(BasketService::new(repository));

    let state = AppState::new(basket_service, store);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Selects the basket store.
///
/// A configured Redis that cannot be reached is fatal; the in-memory store is
/// only used when no Redis is configured at all.
async fn connect_store(config: &Config) -> Result<Arc<dyn BasketStore>> {
    if let Some(redis_url) = &config.redis_url {
        let redis = RedisBasketStore::connect_with_retry(
            redis_url,
            &config.basket_key_prefix,
            config.redis_timeout(),
            config.redis_connect_attempts,
        )
        .await
        .context("Failed to connect to Redis")?;

        tracing::info!("Basket store: Redis");
        Ok(Arc::new(redis))
    } else {
        tracing::warn!("REDIS_URL not set, baskets are kept in process memory");

        let memory = Arc::new(InMemoryBasketStore::new());
        spawn_sweeper(memory.clone(), config.sweep_interval());
        Ok(memory)
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
