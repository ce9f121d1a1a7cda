//! Documentation of a keyword-frequency tracking and ranking service.
//!
//! Clients report the keywords they search for; the service accumulates
//! per-keyword counts in a shared store and serves ranked views derived
//! from those counts.
//!
//!
//!
//! # General Infrastructure
//! - One stateless axum server, one Redis instance, one published catalog
//! - The entire counts table is one Redis record holding a JSON object
//! - Every write path is load, mutate in memory, write back in full
//! - Reads build their views from an independently loaded snapshot
//!
//!
//!
//! # Consistency
//!
//! The store only offers get/put on the stats record, so two concurrent
//! recorders of the same keyword can both read count N and both write N+1,
//! losing one increment. We accept this: counts steer ranking, they are not
//! ledger data, and eventual convergence is enough. Upgrading would mean a
//! per-keyword atomic increment or versioned writes, at the cost of giving
//! up the single-record layout the rest of the pipeline reads in one fetch.
//!
//! Readers never block writers and may observe a table older or newer than
//! an in-flight write. There is no read-your-writes guarantee across calls.
//!
//!
//!
//! # Degradation
//!
//! Every external failure falls back to a conservative value and a log
//! line: unreadable stats record means empty table, failed persist still
//! answers the recorder, unreachable catalog means every hot keyword shows
//! up as a gap. No failure here takes the process down.
//!
//!
//!
//! # Endpoints
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET\|POST /api/record` | count one search keyword |
//! | `GET /api/hot` | ranked hot list |
//! | `GET /api/sync` | key-gated filtered export |
//! | `GET /api/debug` | full table dump with summary |
//! | `GET /api/gaps` | hot keywords the catalog misses |
//! | `POST /api/request` | file a resource request issue |
//! | `GET /api/health`, `GET /api/ping` | liveness |
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod gaps;
pub mod issues;
pub mod keywords;
pub mod ranking;
pub mod routes;
pub mod state;
pub mod stats;
pub mod utils;

use routes::{
    debug_handler, gaps_handler, health_handler, hot_handler, not_found_handler, ping_handler,
    record_get_handler, record_post_handler, request_handler, sync_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60 * 24));

    let app = Router::new()
        .route(
            "/api/record",
            get(record_get_handler).post(record_post_handler),
        )
        .route("/api/hot", get(hot_handler))
        .route("/api/sync", get(sync_handler))
        .route("/api/debug", get(debug_handler))
        .route("/api/gaps", get(gaps_handler))
        .route("/api/request", post(request_handler))
        .route("/api/health", get(health_handler))
        .route("/api/ping", get(ping_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
