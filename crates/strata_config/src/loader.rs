//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::collections::HashSet;
use std::path::Path;

/// Loads and validates a `strata.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join("strata.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `strata.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.store.directory.as_os_str().is_empty() {
        return Err(ConfigError::MissingField("store.directory".to_string()));
    }
    if config.sources.directories.is_empty() {
        return Err(ConfigError::MissingField(
            "sources.directories".to_string(),
        ));
    }
    if config.sources.kinds.is_empty() {
        return Err(ConfigError::MissingField("sources.kinds".to_string()));
    }

    let mut seen = HashSet::new();
    for filter in &config.filters {
        if filter.name.is_empty() {
            return Err(ConfigError::MissingField("filter.name".to_string()));
        }
        if !seen.insert(filter.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "filter '{}' is enabled more than once",
                filter.name
            )));
        }
    }
    Ok(())
}
