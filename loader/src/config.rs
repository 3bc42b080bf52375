//! Run configuration, read from the environment (and an optional `.env`).

use std::env::{self, VarError};
use std::path::PathBuf;

use world_core::constants::{
    BENCHMARK_CITY_IDS, DEFAULT_DB_PATH, DEFAULT_KEYDB_URL, DEFAULT_LOG_FILE, PAGE_SIZE,
};

use crate::error::{LoaderError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub database_path: PathBuf,
    pub keydb_url: String,
    /// `None` logs to stderr only.
    pub log_file: Option<String>,
    pub page_size: usize,
    pub benchmark_ids: Vec<i32>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            keydb_url: DEFAULT_KEYDB_URL.to_string(),
            log_file: Some(DEFAULT_LOG_FILE.to_string()),
            page_size: PAGE_SIZE,
            benchmark_ids: BENCHMARK_CITY_IDS.to_vec(),
        }
    }
}

impl LoaderConfig {
    /// Build the configuration from `WORLD_DB_PATH`, `WORLD_KEYDB_URL` and
    /// `WORLD_LOG_FILE`, loading `.env` first when one exists.
    ///
    /// Page size and benchmark ids are fixed constants and cannot be
    /// overridden here.
    pub fn from_env() -> Result<Self> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Some(path) = env_override("WORLD_DB_PATH")? {
            config.database_path = PathBuf::from(path);
        }
        if let Some(url) = env_override("WORLD_KEYDB_URL")? {
            config.keydb_url = url;
        }
        if let Some(file) = env_override("WORLD_LOG_FILE")? {
            config.log_file = if file.trim().is_empty() {
                None
            } else {
                Some(file)
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(LoaderError::Config("page size must be at least 1".into()));
        }
        if self.keydb_url.trim().is_empty() {
            return Err(LoaderError::Config("KeyDB URL is empty".into()));
        }
        Ok(())
    }
}

/// Value of `name` when set. A value that is not valid UTF-8 is an error
/// rather than a silent fall back to the default.
fn env_override(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(LoaderError::Config(format!(
            "{name} is set but is not valid UTF-8"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_constants() {
        let config = LoaderConfig::default();
        assert_eq!(config.page_size, 500);
        assert_eq!(config.benchmark_ids, vec![9, 364, 4056, 10, 1024, 2689, 10, 555, 3821]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = LoaderConfig {
            page_size: 0,
            ..LoaderConfig::default()
        };
        assert!(matches!(config.validate(), Err(LoaderError::Config(_))));
    }

    #[test]
    fn unset_variable_keeps_the_default() {
        assert_eq!(env_override("WORLD_TEST_NEVER_SET").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_variable_is_a_config_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var("WORLD_TEST_NOT_UNICODE", OsStr::from_bytes(b"world\xff.db"));
        let result = env_override("WORLD_TEST_NOT_UNICODE");
        env::remove_var("WORLD_TEST_NOT_UNICODE");

        match result {
            Err(LoaderError::Config(message)) => {
                assert!(message.contains("WORLD_TEST_NOT_UNICODE"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
