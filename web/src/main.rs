//! Drishti Web – server-rendered situational awareness dashboard.
//!
//! This binary:
//! 1. Loads `.env`, then the config file, then environment overrides
//! 2. Probes the backend once and logs whether it is reachable
//! 3. Runs the axum dashboard server until Ctrl-C / SIGTERM

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use drishti_client::{Backend, DrishtiApi};
use drishti_common::config::{self, Config};
use drishti_web::app::{self, AppState};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "drishti_web=info,drishti_client=info,tower_http=info".into()
            }),
        )
        .init();

    // ── load config ──────────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Config::default_path().to_string());
    let config = config::load_or_default(&PathBuf::from(&config_path))
        .context("Config load failed")?
        .with_env_overrides();

    info!(
        "Drishti Web starting (backend={}, listen={}, maps={})",
        config.api_base_url,
        config.listen_addr,
        if config.maps_api_key.is_some() { "static tiles" } else { "offline plot" }
    );

    // The blocking client must live outside the async runtime.
    let api = Arc::new(
        DrishtiApi::new(config.api_base_url.clone()).context("Cannot build HTTP client")?,
    );

    // ── preflight ────────────────────────────────────────────────────
    let health = api.health_check();
    if health.success {
        info!("Backend reachable at {}", api.base_url());
    } else {
        warn!(
            "Backend unreachable ({}); dashboard will run in offline mode",
            health.error.as_deref().unwrap_or("unknown error")
        );
    }

    // ── ctrl-c ───────────────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || {
        info!("Shutdown signal received");
        flag.store(true, Ordering::Relaxed);
    })
    .context("Cannot set Ctrl-C handler")?;

    // ── serve ────────────────────────────────────────────────────────
    let state = AppState {
        backend: api.clone(),
        config: Arc::new(config),
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot start async runtime")?;
    let result = runtime.block_on(app::run(state, shutdown));
    drop(runtime);

    // last reference, dropped outside the runtime
    drop(api);
    result
}
