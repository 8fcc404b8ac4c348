//! Global config file: `<config dir>/embedfs/config.toml`, optional.

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::PathBuf;

/// Platform config location, if one can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "embedfs", "embedfs")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global file to the builder when its location is known.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml).required(false)),
        None => builder,
    }
}
