//! The catalog of model families that can be queried.
//!
//! The catalog is fixed for the lifetime of the process: either the built-in
//! iPhone 17 Pro family, or a YAML file loaded once at start-up.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::{CatalogError, ConfigError};

/// Describes one model family to search for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelQuery {
    /// Display name; unique within a catalog.
    pub label: String,
    /// Value sent as the `search` query parameter.
    pub search_term: String,
    /// Fixed part numbers restricting results to this family.
    #[serde(default)]
    pub part_numbers: Option<Vec<String>>,
}

impl ModelQuery {
    #[must_use]
    pub fn new(label: &str, search_term: &str) -> Self {
        Self {
            label: label.to_owned(),
            search_term: search_term.to_owned(),
            part_numbers: None,
        }
    }

    /// Fixed part numbers, or an empty slice when the model imposes none.
    #[must_use]
    pub fn fixed_parts(&self) -> &[String] {
        self.part_numbers.as_deref().unwrap_or_default()
    }
}

/// Ordered, immutable list of [`ModelQuery`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    models: Vec<ModelQuery>,
}

impl Catalog {
    /// The built-in catalog: iPhone 17 Pro, then iPhone 17 Pro Max.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelQuery::new("iPhone 17 Pro", "iPhone 17 Pro"),
                ModelQuery::new("iPhone 17 Pro Max", "iPhone 17 Pro Max"),
            ],
        }
    }

    #[must_use]
    pub fn models(&self) -> &[ModelQuery] {
        &self.models
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.label.as_str())
    }

    /// Looks up a model by its exact label.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownModel`] if no model carries `label`.
    pub fn find(&self, label: &str) -> Result<&ModelQuery, CatalogError> {
        self.models
            .iter()
            .find(|m| m.label == label)
            .ok_or_else(|| CatalogError::UnknownModel {
                label: label.to_owned(),
                known: self.labels().map(str::to_owned).collect(),
            })
    }

    /// Resolves a user selection into catalog entries.
    ///
    /// An empty selection yields the whole catalog. Otherwise every requested
    /// label must exist, and the result follows catalog order with each model
    /// appearing once no matter how often it was requested.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownModel`] for the first label that is not
    /// in the catalog.
    pub fn resolve_selection<S: AsRef<str>>(
        &self,
        selected: &[S],
    ) -> Result<Vec<&ModelQuery>, CatalogError> {
        if selected.is_empty() {
            return Ok(self.models.iter().collect());
        }

        let mut wanted = HashSet::new();
        for label in selected {
            wanted.insert(self.find(label.as_ref())?.label.as_str());
        }

        Ok(self
            .models
            .iter()
            .filter(|m| wanted.contains(m.label.as_str()))
            .collect())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Parse and validate a catalog from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::CatalogFileParse`] on malformed YAML and
/// [`ConfigError::Validation`] if the catalog breaks a uniqueness or
/// non-empty rule.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let catalog: Catalog = serde_yaml::from_str(content).map_err(ConfigError::CatalogFileParse)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    if catalog.models.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must define at least one model".to_string(),
        ));
    }

    let mut seen_labels = HashSet::new();

    for model in &catalog.models {
        if model.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "model label must be non-empty".to_string(),
            ));
        }

        if model.search_term.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "model '{}' has an empty search_term",
                model.label
            )));
        }

        if !seen_labels.insert(model.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate model label: '{}'",
                model.label
            )));
        }

        let mut seen_parts = HashSet::new();
        for part in model.fixed_parts() {
            if part.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "model '{}' lists an empty part number",
                    model.label
                )));
            }
            if !seen_parts.insert(part.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "model '{}' lists part number '{part}' more than once",
                    model.label
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
