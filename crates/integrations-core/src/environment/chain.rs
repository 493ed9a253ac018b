//! Chained environment with fallback behavior

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use super::file::FileEnvironment;
use super::process::ProcessEnvironment;
use super::traits::Environment;
use crate::resolver::ConfigResult;

/// Environment that consults several sources in order
///
/// The first source that has a key wins, so earlier sources override later
/// ones.
///
/// # Example
///
/// ```
/// use integrations_core::environment::{Environment, ChainEnvironment, MemoryEnvironment};
/// use std::sync::Arc;
///
/// let overrides = Arc::new(MemoryEnvironment::new().with("STORAGE_TYPE", "s3"));
/// let defaults = Arc::new(MemoryEnvironment::new().with("STORAGE_TYPE", "local"));
///
/// let chain = ChainEnvironment::new(vec![overrides, defaults]);
/// assert_eq!(chain.get("STORAGE_TYPE"), Some("s3".to_string()));
/// ```
pub struct ChainEnvironment {
    sources: Vec<Arc<dyn Environment>>,
}

impl ChainEnvironment {
    /// Create a new chain, highest priority first
    pub fn new(sources: Vec<Arc<dyn Environment>>) -> Self {
        Self { sources }
    }

    /// Process environment layered over a `.env` (or YAML) file
    pub fn dotenv_layered(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let file = FileEnvironment::load(path)?;
        Ok(Self::new(vec![
            Arc::new(ProcessEnvironment::new()),
            Arc::new(file),
        ]))
    }

    /// Get the sources in this chain
    pub fn sources(&self) -> &[Arc<dyn Environment>] {
        &self.sources
    }

    /// Find which source answers for a key
    pub fn find_source(&self, key: &str) -> Option<&Arc<dyn Environment>> {
        self.sources.iter().find(|source| source.has(key))
    }
}

impl Environment for ChainEnvironment {
    fn name(&self) -> &str {
        "chain"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    fn keys(&self) -> Vec<String> {
        let keys: BTreeSet<String> = self
            .sources
            .iter()
            .flat_map(|source| source.keys())
            .collect();
        keys.into_iter().collect()
    }
}

// Arc<dyn Environment> doesn't implement Debug
impl std::fmt::Debug for ChainEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainEnvironment")
            .field("sources", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use crate::environment::MemoryEnvironment;

    #[test]
    fn test_chain_fallback() {
        let first = Arc::new(MemoryEnvironment::new());
        let second = Arc::new(MemoryEnvironment::new().with("REDIS_HOST", "cache"));

        let chain = ChainEnvironment::new(vec![first, second]);
        assert_eq!(chain.get("REDIS_HOST"), Some("cache".to_string()));
        assert_eq!(chain.get("MISSING"), None);
    }

    #[test]
    fn test_chain_priority() {
        let first = Arc::new(MemoryEnvironment::new().with("REDIS_HOST", "primary"));
        let second = Arc::new(MemoryEnvironment::new().with("REDIS_HOST", "secondary"));

        let chain = ChainEnvironment::new(vec![first, second]);
        assert_eq!(chain.get("REDIS_HOST"), Some("primary".to_string()));
    }

    #[test]
    fn test_chain_keys_are_merged() {
        let first = Arc::new(MemoryEnvironment::new().with("A", "1").with("B", "1"));
        let second = Arc::new(MemoryEnvironment::new().with("B", "2").with("C", "2"));

        let chain = ChainEnvironment::new(vec![first, second]);
        assert_eq!(chain.keys(), vec!["A".to_string(), "B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_chain_find_source() {
        let file_env = Arc::new(MemoryEnvironment::new().with("SENTRY_DSN", "dsn"));
        let chain = ChainEnvironment::new(vec![file_env]);

        assert_eq!(chain.find_source("SENTRY_DSN").unwrap().name(), "memory");
        assert!(chain.find_source("MISSING").is_none());
    }

    #[test]
    fn test_dotenv_layered_process_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "INTEGRATIONS_TEST_LAYERED=from_file\nINTEGRATIONS_TEST_FILE_ONLY=file\n",
        )
        .unwrap();
        std::env::set_var("INTEGRATIONS_TEST_LAYERED", "from_process");

        let chain = ChainEnvironment::dotenv_layered(&path).unwrap();
        assert_eq!(chain.get("INTEGRATIONS_TEST_LAYERED"), Some("from_process".to_string()));
        assert_eq!(chain.get("INTEGRATIONS_TEST_FILE_ONLY"), Some("file".to_string()));

        std::env::remove_var("INTEGRATIONS_TEST_LAYERED");
    }
}
