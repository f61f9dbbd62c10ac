use std::path::PathBuf;

/// Runtime configuration, filled from `SETTINGS_*` environment variables
/// in `main` and carried on the application state.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub page_title: String,
    pub required_capability: String,
    /// `None` selects the in-process memory store.
    pub store_root: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            page_title: "My Settings Tabs".to_string(),
            required_capability: "activate_plugins".to_string(),
            store_root: Some(PathBuf::from("artifacts/options-store")),
            max_body_bytes: 16 * 1024,
        }
    }
}

/// Startup contract check; violations abort before the listener binds.
pub fn validate_startup_config(config: &ServerConfig) -> Result<(), String> {
    if config.page_title.trim().is_empty() {
        return Err("page title must not be empty (the storage-key slug derives from it)".into());
    }
    if config.max_body_bytes == 0 {
        return Err("max_body_bytes must be positive".into());
    }
    if config.bind_addr.parse::<std::net::SocketAddr>().is_err() {
        return Err(format!("invalid bind addr: {}", config.bind_addr));
    }
    Ok(())
}
