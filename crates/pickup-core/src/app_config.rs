use std::path::PathBuf;

/// Runtime settings resolved from the environment at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fulfilment endpoint queried for every model.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Optional YAML file replacing the built-in model catalog.
    pub catalog_path: Option<PathBuf>,
}
