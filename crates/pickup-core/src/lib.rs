mod app_config;
mod catalog;
mod config;
mod error;
mod record;

pub use app_config::AppConfig;
pub use catalog::{load_catalog, parse_catalog, Catalog, ModelQuery};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError};
pub use record::AvailabilityRecord;
