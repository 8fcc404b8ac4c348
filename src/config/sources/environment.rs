//! Environment variable source: EMBEDFS_ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses EMBEDFS_ prefix and __ as separator for nested keys; `tags` is a
/// comma-separated list.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("EMBEDFS")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("tags")
            .try_parsing(true),
    )
}
