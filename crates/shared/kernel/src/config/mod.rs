use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default config file stem, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "burrow";

/// Prefix for environment overrides (`BURROW__LOG__LEVEL` maps to `log.level`).
pub const ENV_PREFIX: &str = "BURROW";

/// Custom error type for config loading.
#[burrow_derive::burrow_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file overlaid with environment variables.
///
/// Layers, lowest priority first:
/// 1. **File**: `path` if given (must exist), otherwise [`DEFAULT_CONFIG`] in
///    the working directory (optional). Any format `config` recognizes by
///    extension (`.toml`, `.json`, `.yaml`, ...).
/// 2. **Environment**: variables prefixed with `BURROW__`, nested keys joined
///    with `__`.
///
/// Fields missing from every layer fall back to `T`'s serde defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing or the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use burrow_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     #[serde(default)]
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
