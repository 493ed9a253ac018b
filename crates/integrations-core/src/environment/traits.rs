//! Core traits for reading environment settings

use std::fmt::Display;
use std::str::FromStr;

use crate::resolver::{ConfigError, ConfigResult};
use crate::types::BackendKind;

/// Read-only source of named settings
///
/// Implementations:
/// - Process environment variables (`ProcessEnvironment`)
/// - In-memory maps for tests and snapshots (`MemoryEnvironment`)
/// - `.env` / YAML files (`FileEnvironment`)
/// - Ordered fallback over other sources (`ChainEnvironment`)
///
/// # Example
///
/// ```
/// use integrations_core::environment::{Environment, MemoryEnvironment};
///
/// let env = MemoryEnvironment::new().with("STORAGE_TYPE", "local");
/// assert_eq!(env.get("STORAGE_TYPE"), Some("local".to_string()));
/// ```
pub trait Environment: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Raw value of a setting
    fn get(&self, key: &str) -> Option<String>;

    /// Names of every setting this source can currently answer for
    fn keys(&self) -> Vec<String>;

    /// Check if a setting exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Typed accessors used by the resolvers
///
/// Blank values are treated the same as absent ones, so `FOO=` in a `.env`
/// file does not select anything.
pub trait EnvironmentExt: Environment {
    /// Trimmed, non-empty value of a setting
    fn setting(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Setting value, or `default` when absent
    fn setting_or(&self, key: &str, default: &str) -> String {
        self.setting(key).unwrap_or_else(|| default.to_string())
    }

    /// Setting the selected kind cannot do without
    fn require<K: BackendKind>(&self, key: &str, kind: K) -> ConfigResult<String> {
        self.setting(key).ok_or_else(|| ConfigError::missing(kind, key))
    }

    /// Setting parsed with `FromStr`
    fn parsed<T>(&self, key: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.setting(key) {
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::invalid(key, raw.as_str(), e.to_string())),
            None => Ok(None),
        }
    }

    /// Backend kind selected by a setting, default kind when absent
    fn backend_kind<K: BackendKind>(&self, key: &str) -> ConfigResult<K> {
        match self.get(key) {
            None => Ok(K::default_kind()),
            Some(raw) => K::parse(&raw).ok_or_else(|| ConfigError::unrecognized::<K>(raw)),
        }
    }
}

impl<T: Environment + ?Sized> EnvironmentExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use crate::types::{QueueKind, StorageKind};

    #[test]
    fn test_setting_trims_and_drops_blank() {
        let env = MemoryEnvironment::new()
            .with("PADDED", "  value ")
            .with("BLANK", "   ");
        assert_eq!(env.setting("PADDED"), Some("value".to_string()));
        assert_eq!(env.setting("BLANK"), None);
        assert_eq!(env.setting("MISSING"), None);
        assert_eq!(env.setting_or("BLANK", "fallback"), "fallback");
    }

    #[test]
    fn test_parsed() {
        let env = MemoryEnvironment::new()
            .with("REDIS_PORT", "6380")
            .with("BAD_PORT", "redis");
        assert_eq!(env.parsed::<u16>("REDIS_PORT").unwrap(), Some(6380));
        assert_eq!(env.parsed::<u16>("MISSING").unwrap(), None);
        assert!(matches!(
            env.parsed::<u16>("BAD_PORT"),
            Err(ConfigError::InvalidSetting { ref key, ref value, .. }) if key == "BAD_PORT" && value == "redis"
        ));
    }

    #[test]
    fn test_require() {
        let env = MemoryEnvironment::new().with("PG_DATABASE_URL", "postgres://db");
        assert_eq!(
            env.require("PG_DATABASE_URL", QueueKind::DatabaseBacked).unwrap(),
            "postgres://db"
        );
        assert!(matches!(
            env.require("OTHER", QueueKind::DatabaseBacked),
            Err(ConfigError::MissingSetting { .. })
        ));
    }

    #[test]
    fn test_backend_kind() {
        let env = MemoryEnvironment::new()
            .with("GOOD", "s3")
            .with("BAD", "ftp")
            .with("BLANK", "");
        assert_eq!(env.backend_kind::<StorageKind>("GOOD").unwrap(), StorageKind::RemoteObjectStore);
        assert_eq!(env.backend_kind::<StorageKind>("MISSING").unwrap(), StorageKind::Local);
        assert!(matches!(
            env.backend_kind::<StorageKind>("BAD"),
            Err(ConfigError::UnrecognizedBackendKind { ref value, .. }) if value == "ftp"
        ));
        // present but blank is a value nobody recognizes
        assert!(env.backend_kind::<StorageKind>("BLANK").is_err());
    }
}
