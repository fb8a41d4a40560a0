//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database pool and migrations, payment gateway
//! setup, and the Axum server lifecycle including graceful shutdown.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{ContestRepository, ParticipationRepository, UserRepository};
use crate::infrastructure::payments::{DisabledGateway, PaymentGateway, StripeGateway};
use crate::infrastructure::persistence::{
    MemoryStore, PgContestRepository, PgParticipationRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Backends};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or the in-memory store)
/// - Payment gateway (Stripe, or disabled when no key is configured)
/// - Axum HTTP server, stopped by SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (storage, pool) = build_storage(&config).await?;
    let gateway = build_gateway(&config)?;

    let state = AppState::new(
        Backends {
            users: storage.users,
            contests: storage.contests,
            participations: storage.participations,
            gateway,
        },
        &config.token_secret,
        config.token_ttl_hours,
    );

    let app = app_router(state, &config.cors_allow_origin);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Contest hub listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
    tracing::info!("Server shutdown complete");

    Ok(())
}

struct Storage {
    users: Arc<dyn UserRepository>,
    contests: Arc<dyn ContestRepository>,
    participations: Arc<dyn ParticipationRepository>,
}

async fn build_storage(config: &Config) -> Result<(Storage, Option<PgPool>)> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok((
                Storage {
                    users: store.clone(),
                    contests: store.clone(),
                    participations: store,
                },
                None,
            ))
        }
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            let pool_arc = Arc::new(pool.clone());
            Ok((
                Storage {
                    users: Arc::new(PgUserRepository::new(pool_arc.clone())),
                    contests: Arc::new(PgContestRepository::new(pool_arc.clone())),
                    participations: Arc::new(PgParticipationRepository::new(pool_arc)),
                },
                Some(pool),
            ))
        }
    }
}

/// Creates the connection pool and applies pending migrations.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

fn build_gateway(config: &Config) -> Result<Arc<dyn PaymentGateway>> {
    match &config.stripe_secret_key {
        Some(key) => {
            tracing::info!("Payments enabled (Stripe)");
            Ok(Arc::new(StripeGateway::new(
                config.stripe_api_base.clone(),
                key.clone(),
            )?))
        }
        None => {
            tracing::info!("Payments disabled (DisabledGateway)");
            Ok(Arc::new(DisabledGateway::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
