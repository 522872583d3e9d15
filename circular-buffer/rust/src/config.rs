use std::{
    env::{self, VarError},
    fmt::Display,
    num::ParseIntError,
    sync::OnceLock,
};

use thiserror::Error;

const DEFAULT_CAPACITY: usize = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("CAPACITY must be an unsigned integer, got {value:?}: {source}")]
    Capacity { value: String, source: ParseIntError },
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
}

pub(crate) struct Config {
    inner: Box<ConfigInner>,
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "capacity={} log_level={}", self.inner.capacity, self.inner.log_level)
    }
}

/// Loads the config from the environment on first use
pub(crate) fn get() -> Result<&'static Config, ConfigError> {
    static CELL: OnceLock<Config> = OnceLock::new();

    if let Some(config) = CELL.get() {
        return Ok(config);
    }

    let config = Config::from_vars(var("CAPACITY")?, var("RUST_LOG")?)?;
    Ok(CELL.get_or_init(|| config))
}

fn var(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
    }
}

impl Config {
    fn from_vars(capacity: Option<String>, log_level: Option<String>) -> Result<Self, ConfigError> {
        let capacity = match capacity {
            None => DEFAULT_CAPACITY,
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|source| ConfigError::Capacity { value, source })?,
        };

        Ok(Config {
            inner: Box::new(ConfigInner {
                capacity,
                log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            }),
        })
    }

    pub(crate) fn get_capacity(&'static self) -> usize {
        self.inner.capacity
    }

    pub(crate) fn get_log_level(&'static self) -> &'_ str {
        &self.inner.log_level
    }
}

#[derive(Debug)]
struct ConfigInner {
    capacity: usize,
    log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(10, config.inner.capacity);
        assert_eq!("info", config.inner.log_level);
    }

    #[test]
    fn explicit_values() {
        let config = Config::from_vars(Some(" 64 ".to_owned()), Some("debug".to_owned())).unwrap();
        assert_eq!(64, config.inner.capacity);
        assert_eq!("debug", config.inner.log_level);
        assert_eq!("capacity=64 log_level=debug", config.to_string());
    }

    #[test]
    fn invalid_capacity() {
        let result = Config::from_vars(Some("-3".to_owned()), None);
        assert!(matches!(result, Err(ConfigError::Capacity { ref value, .. }) if value == "-3"));
    }
}
