use thiserror::Error;

/// Errors raised while building [`crate::AppConfig`] or loading a catalog file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

/// Errors raised by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown model '{label}' (known models: {})", .known.join(", "))]
    UnknownModel { label: String, known: Vec<String> },
}
