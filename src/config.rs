use crate::errors::ConfigError;
use crate::generator::{DEFAULT_DAY_COUNT, check_day_count};
use std::env;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PROJECT: &str = "demo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub day_count: u32,
    /// Fixed seed for every render; entropy when unset.
    pub seed: Option<u64>,
    pub default_project: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            day_count: DEFAULT_DAY_COUNT,
            seed: None,
            default_project: DEFAULT_PROJECT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_var(&lookup, "PORT", "a port number")?.unwrap_or(defaults.port);
        let day_count = parse_var(&lookup, "DASHBOARD_DAY_COUNT", "a non-negative integer")?
            .unwrap_or(defaults.day_count);
        let day_count = check_day_count(day_count)?;
        let seed = parse_var(&lookup, "DASHBOARD_SEED", "an unsigned 64-bit integer")?;
        let default_project = lookup("DASHBOARD_DEFAULT_PROJECT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.default_project);

        Ok(Self {
            port,
            day_count,
            seed,
            default_project,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        })
}
