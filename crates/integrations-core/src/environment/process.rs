//! Process environment variables

use std::env;

use super::memory::MemoryEnvironment;
use super::traits::Environment;

/// Environment backed by the live process environment
///
/// Values are read on every call. Use [`ProcessEnvironment::snapshot`] to
/// freeze the current values before resolving, so every resolver sees the
/// same settings even if something mutates the environment concurrently.
///
/// Variables that are not valid unicode are ignored.
///
/// # Example
///
/// ```
/// use integrations_core::environment::{Environment, ProcessEnvironment};
///
/// let env = ProcessEnvironment::new();
/// let _storage = env.get("STORAGE_TYPE");
/// ```
#[derive(Debug, Default)]
pub struct ProcessEnvironment {
    _private: (),
}

impl ProcessEnvironment {
    /// Create a new process environment reader
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Copy the current process environment into memory
    pub fn snapshot() -> MemoryEnvironment {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }
}

impl Environment for ProcessEnvironment {
    fn name(&self) -> &str {
        "process"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn keys(&self) -> Vec<String> {
        env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .collect()
    }
}
