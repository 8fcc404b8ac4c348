//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::GeneratorConfig;
use crate::error::CliError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<GeneratorConfig, CliError> {
        let config = MergeService::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<GeneratorConfig, CliError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> GeneratorConfig {
        GeneratorConfig::default()
    }
}
