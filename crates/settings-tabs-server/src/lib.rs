#![forbid(unsafe_code)]
//! Settings page host: owns routing, option storage, the submission
//! endpoint, and the startup wiring that binds the pure renderers to the
//! schema registry.

mod config;
mod host;
mod http;
mod schema;
mod store;
mod telemetry;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use settings_tabs_model::SchemaRegistry;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

pub use config::{validate_startup_config, ServerConfig};
pub use host::{
    ensure_options, wire_settings, FieldRenderFn, IntroRenderFn, RegisteredField, RegisteredPage,
    RegisteredSection, SettingsHost,
};
pub use schema::demo_schema;
pub use store::{LocalFsStore, MemoryStore, OptionStore, StoreError};
pub use telemetry::RequestMetrics;

pub const CRATE_NAME: &str = "settings-tabs-server";

pub const SETTINGS_PATH: &str = "/settings";
pub const SUBMIT_PATH: &str = "/settings/save";

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SchemaRegistry>,
    pub host: Arc<SettingsHost>,
    pub store: Arc<dyn OptionStore>,
    pub config: ServerConfig,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: SchemaRegistry, store: Arc<dyn OptionStore>) -> Self {
        Self::with_config(registry, store, ServerConfig::default())
    }

    #[must_use]
    pub fn with_config(
        registry: SchemaRegistry,
        store: Arc<dyn OptionStore>,
        config: ServerConfig,
    ) -> Self {
        let host = wire_settings(&registry, &config.required_capability);
        Self {
            registry: Arc::new(registry),
            host: Arc::new(host),
            store,
            config,
            ready: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::landing_handler))
        .route(SETTINGS_PATH, get(http::handlers::settings_page_handler))
        .route(SUBMIT_PATH, post(http::handlers::save_settings_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
