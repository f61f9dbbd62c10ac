#![forbid(unsafe_code)]

use settings_tabs_server::{
    build_router, demo_schema, ensure_options, validate_startup_config, AppState, LocalFsStore,
    MemoryStore, OptionStore, ServerConfig,
};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("SETTINGS_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config = ServerConfig {
        bind_addr: env_string("SETTINGS_BIND", "127.0.0.1:8080"),
        page_title: env_string("SETTINGS_PAGE_TITLE", "My Settings Tabs"),
        required_capability: env_string("SETTINGS_CAPABILITY", "activate_plugins"),
        store_root: if env_bool("SETTINGS_STORE_MEMORY", false) {
            None
        } else {
            Some(PathBuf::from(env_string(
                "SETTINGS_STORE_ROOT",
                "artifacts/options-store",
            )))
        },
        max_body_bytes: env_usize("SETTINGS_MAX_BODY_BYTES", 16 * 1024),
    };
    validate_startup_config(&config)?;

    let store: Arc<dyn OptionStore> = match &config.store_root {
        Some(root) => Arc::new(LocalFsStore::new(root.clone())),
        None => Arc::new(MemoryStore::new()),
    };

    let registry = demo_schema(&config.page_title);
    registry
        .audit()
        .map_err(|e| format!("schema audit failed: {e}"))?;

    let state = AppState::with_config(registry, store, config.clone());

    // Ready only once every fields-bearing tab has a store entry.
    state.ready.store(false, Ordering::Relaxed);
    match ensure_options(&state.registry, state.store.as_ref()).await {
        Ok(()) => state.ready.store(true, Ordering::Relaxed),
        Err(e) => error!("option store initialization failed: {e}"),
    }

    let app = build_router(state.clone());
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| format!("bind failed on {}: {e}", config.bind_addr))?;
    info!(
        "settings server listening on {} (store: {})",
        config.bind_addr,
        state.store.backend_tag()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
