//! In-memory environment

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::Environment;

/// In-memory settings for tests and startup snapshots
///
/// # Thread Safety
///
/// The environment uses `RwLock` internally and is safe to share across threads.
///
/// # Example
///
/// ```
/// use integrations_core::environment::{Environment, MemoryEnvironment};
///
/// let env = MemoryEnvironment::new()
///     .with("LOGGER_DRIVER", "sentry")
///     .with("SENTRY_DSN", "https://key@sentry.example/1");
/// assert!(env.has("SENTRY_DSN"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    settings: RwLock<HashMap<String, String>>,
}

impl MemoryEnvironment {
    /// Create a new empty environment
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(HashMap::new()),
        }
    }

    /// Create an environment with initial values
    pub fn with_settings(initial: HashMap<String, String>) -> Self {
        Self {
            settings: RwLock::new(initial),
        }
    }

    /// Copy every setting another environment exposes
    pub fn snapshot_of(source: &dyn Environment) -> Self {
        let settings = source
            .keys()
            .into_iter()
            .filter_map(|key| source.get(&key).map(|value| (key, value)))
            .collect();
        Self::with_settings(settings)
    }

    /// Builder-style setter
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.write().insert(key.into(), value.into());
    }

    /// Remove a value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.settings.write().remove(key)
    }

    /// Number of settings
    pub fn len(&self) -> usize {
        self.settings.read().len()
    }

    /// Check if the environment is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Environment for MemoryEnvironment {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.settings.read().get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.settings.read().keys().cloned().collect()
    }
}

impl Clone for MemoryEnvironment {
    fn clone(&self) -> Self {
        Self::with_settings(self.settings.read().clone())
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_settings(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
