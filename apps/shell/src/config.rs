use burrow::kernel::config::{ConfigError, load_config};
use burrow_logger::LogSettings;
use serde::Deserialize;
use std::path::Path;

/// Settings read from the config file and `BURROW__*` environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ShellConfig {
    pub(crate) log: LogSettings,
}

impl ShellConfig {
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_log_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shell.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\nconsole = false\n").unwrap();

        let config = ShellConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(!config.log.console);
        assert!(config.log.directory.is_none());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shell.toml");
        fs::write(&path, "[server]\nport = 1\n").unwrap();

        assert!(ShellConfig::load(Some(path.as_path())).is_err());
    }
}
