//! MergeService: orchestrates sources and deserializes to GeneratorConfig.

use crate::config::sources::{environment, file, global_file};
use crate::config::GeneratorConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: global file (lowest) -> environment (highest).
    pub fn load() -> Result<GeneratorConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder);
        let builder = environment::add_to_builder(builder);

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Precedence: explicit file (lowest) -> environment (highest).
    ///
    /// The global file is skipped when a file is named explicitly.
    pub fn load_from_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let builder = Config::builder();
        let builder = file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder);

        let config = builder.build()?;
        config.try_deserialize()
    }
}
