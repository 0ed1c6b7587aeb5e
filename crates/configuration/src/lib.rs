use crate::error::ConfigError;
use serde::de::DeserializeOwned;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};

/// Variables read from the environment instead of the real process
/// environment. Used by tests and by callers that assemble settings themselves.
pub type EnvOverrides = config::Map<String, String>;

/// Loads the application configuration from the process environment.
///
/// Call this once at process start (after `dotenvy` has populated the
/// environment) and hand the resulting `Config` to the components that need it.
/// Missing database settings are not an error here; they are reported when a
/// connection is requested.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(None)
}

/// Same as [`load_config`], but reads variables from `overrides` when given.
pub fn load_config_from(overrides: Option<EnvOverrides>) -> Result<Config, ConfigError> {
    // DB_HOST, DB_USER, DB_PASSWORD, DB_NAME, DB_PORT
    let database: DatabaseSettings = load_section(
        config::Environment::with_prefix("DB").source(overrides.clone()),
    )?;

    // PORT, BIND_ADDRESS, ALLOWED_ORIGINS
    let server: ServerSettings = load_section(
        config::Environment::default()
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_origins")
            .source(overrides.clone()),
    )?;

    // LOG_DIR
    let logging: LoggingSettings =
        load_section(config::Environment::with_prefix("LOG").source(overrides))?;

    Ok(Config { database, server, logging })
}

fn load_section<T: DeserializeOwned>(source: config::Environment) -> Result<T, ConfigError> {
    let builder = config::Config::builder().add_source(source).build()?;
    Ok(builder.try_deserialize::<T>()?)
}
