//! Generator configuration
//!
//! Settings come from defaults, an optional global file, an optional explicit
//! file and `EMBEDFS__*` environment variables, in that order of precedence.
//! Command-line flags are applied on top by the CLI.

mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::compression::DEFAULT_MIN_SPACE_SAVINGS;
use crate::encoder::EncoderOptions;
use crate::error::CliError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

fn default_min_gzip_space_savings() -> f64 {
    DEFAULT_MIN_SPACE_SAVINGS
}

/// Settings for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Consider gzip compression (default: false)
    #[serde(default)]
    pub gzip: bool,

    /// Minimum space savings in percent for compressed storage (default: 5)
    #[serde(default = "default_min_gzip_space_savings")]
    pub min_gzip_space_savings: f64,

    /// `cfg` predicates guarding the generated module
    #[serde(default)]
    pub tags: Vec<String>,

    /// Leading path elements removed from every input path
    #[serde(default)]
    pub strip: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gzip: false,
            min_gzip_space_savings: default_min_gzip_space_savings(),
            tags: Vec::new(),
            strip: 0,
            logging: LoggingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.min_gzip_space_savings.is_finite() {
            return Err(CliError::ConfigError(format!(
                "min_gzip_space_savings must be a finite number, got {}",
                self.min_gzip_space_savings
            )));
        }
        Ok(())
    }

    pub fn encoder_options(&self) -> EncoderOptions {
        EncoderOptions::default()
            .with_tags(self.tags.iter().cloned())
            .with_gzip(self.gzip)
            .with_min_gzip_space_savings(self.min_gzip_space_savings)
            .with_strip(self.strip)
    }
}
