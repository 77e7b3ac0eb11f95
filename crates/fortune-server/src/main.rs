//! Fortune Server
//!
//! Serves fortune records over HTTP. Records live in memory and are
//! mirrored to Redis when it is reachable at startup.

mod config;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use clap::Parser;
use fortune_core::{default_fortunes, SecondaryStore};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::Config;
use services::FortuneStore;
use storage::RedisStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FortuneStore>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = Config::parse();

    info!("Starting Fortune Server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        "Config: bind={}, redis={}, collection={}",
        config.bind_address, config.redis_addr, config.redis_collection
    );

    let secondary = connect_secondary(&config).await;
    let seed = if config.no_seed {
        Vec::new()
    } else {
        default_fortunes()
    };
    let store = Arc::new(FortuneStore::new(seed, secondary));

    if store.has_secondary() {
        let loaded = store.load_from_secondary().await;
        info!("Loaded {} fortunes from Redis", loaded);
    }
    if store.is_empty().await {
        warn!("Starting with no fortunes");
    } else {
        info!("Serving {} fortunes", store.len().await);
    }

    let app = build_app(AppState { store });

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Probe Redis once at startup. On failure the process stays in-memory only.
async fn connect_secondary(config: &Config) -> Option<Arc<dyn SecondaryStore>> {
    if config.no_redis {
        info!("Redis disabled, using in-memory only");
        return None;
    }

    match RedisStore::connect_with_retry(&config.redis_options()).await {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            warn!("Redis not reachable, using in-memory only: {}", e);
            None
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    fortune_routes()
        .fallback(handlers::not_found)
        .layer(middleware::map_response(handlers::json_content_type))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn fortune_routes() -> Router<AppState> {
    Router::new()
        .route("/fortunes", collection_route())
        .route("/fortunes/", collection_route())
        .route(
            "/fortunes/random",
            get(handlers::fortunes::random)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        .route(
            "/fortunes/:id",
            get(handlers::fortunes::get)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
}

fn collection_route() -> MethodRouter<AppState> {
    get(handlers::fortunes::list)
        .post(handlers::fortunes::create)
        .head(handlers::not_found)
        .fallback(handlers::not_found)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
