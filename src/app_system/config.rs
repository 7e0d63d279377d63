use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;
pub const DEFAULT_PAYMENT_TIMEOUT_SECS: u64 = 600;

/// Runtime settings, read from the environment.
///
/// | Env Var                      | Default                 |
/// |------------------------------|-------------------------|
/// | `BRISK_STORAGE_DIR`          | unset (in-memory store) |
/// | `BRISK_STORAGE_NAMESPACE`    | unset (bare keys)       |
/// | `BRISK_CHANNEL_CAPACITY`     | `32`                    |
/// | `BRISK_PAYMENT_TIMEOUT_SECS` | `600`                   |
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Directory for the file backend. `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,
    /// Prefix for every storage key, e.g. `staging` → `staging_brisk_services_v1`.
    pub storage_namespace: Option<String>,
    pub channel_capacity: usize,
    pub payment_timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_namespace: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            payment_timeout: Duration::from_secs(DEFAULT_PAYMENT_TIMEOUT_SECS),
        }
    }
}

fn parse_positive<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "positive integer",
            value: raw,
        }),
    }
}

impl SiteConfig {
    /// Load from the process environment. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let channel_capacity = parse_positive(
            "BRISK_CHANNEL_CAPACITY",
            get("BRISK_CHANNEL_CAPACITY"),
            DEFAULT_CHANNEL_CAPACITY,
        )?;
        let timeout_secs = parse_positive(
            "BRISK_PAYMENT_TIMEOUT_SECS",
            get("BRISK_PAYMENT_TIMEOUT_SECS"),
            DEFAULT_PAYMENT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            storage_dir: get("BRISK_STORAGE_DIR").map(PathBuf::from),
            storage_namespace: get("BRISK_STORAGE_NAMESPACE").map(|ns| ns.trim().to_string()),
            channel_capacity,
            payment_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Storage key for a collection under the configured namespace.
    pub fn storage_key(&self, base: &str) -> String {
        match &self.storage_namespace {
            Some(namespace) => format!("{}_{}", namespace, base),
            None => base.to_string(),
        }
    }
}
