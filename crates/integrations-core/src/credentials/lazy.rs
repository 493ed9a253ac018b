//! Lazily-resolved credential reference

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::traits::{CredentialContext, CredentialProvider, CredentialResult, Credentials};

/// Credential reference handed to the object store client
///
/// Holding one costs nothing: discovery runs on the first [`resolve`] and
/// the result is memoized for every clone. A failed discovery is not cached,
/// so the client sees the error again on its next attempt.
///
/// Two references are equal when they would ask the same provider for the
/// same region, which keeps resolved configs comparable.
///
/// [`resolve`]: LazyCredentials::resolve
#[derive(Clone)]
pub struct LazyCredentials {
    provider: Arc<dyn CredentialProvider>,
    context: CredentialContext,
    cell: Arc<OnceCell<Credentials>>,
}

impl LazyCredentials {
    /// Wrap a provider; nothing is discovered yet
    pub fn new(provider: Arc<dyn CredentialProvider>, region: Option<String>) -> Self {
        Self {
            provider,
            context: CredentialContext { region },
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Name of the provider that will be asked
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Region passed to the provider
    pub fn region(&self) -> Option<&str> {
        self.context.region.as_deref()
    }

    /// Whether discovery has already succeeded
    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    /// Credentials, discovering them on first call
    pub async fn resolve(&self) -> CredentialResult<Credentials> {
        let credentials = self
            .cell
            .get_or_try_init(|| self.provider.provide(&self.context))
            .await?;
        Ok(credentials.clone())
    }
}

impl PartialEq for LazyCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.provider.name() == other.provider.name() && self.context == other.context
    }
}

impl std::fmt::Debug for LazyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyCredentials")
            .field("provider", &self.provider.name())
            .field("region", &self.context.region)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::credentials::{CredentialError, StaticCredentialProvider};

    /// Counts discovery attempts, failing the first `failures` of them
    struct Counting {
        calls: AtomicUsize,
        failures: usize,
    }

    #[async_trait]
    impl CredentialProvider for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        async fn provide(&self, context: &CredentialContext) -> CredentialResult<Credentials> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(CredentialError::NotFound("counting".to_string()));
            }
            Ok(Credentials::new("AKID", "SECRET")
                .with_source(context.region.clone().unwrap_or_default()))
        }
    }

    #[tokio::test]
    async fn test_discovery_is_deferred_and_memoized() {
        let provider = Arc::new(Counting { calls: AtomicUsize::new(0), failures: 0 });
        let lazy = LazyCredentials::new(provider.clone(), Some("us-east-1".to_string()));
        let copy = lazy.clone();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(!lazy.is_resolved());

        let creds = lazy.resolve().await.unwrap();
        assert_eq!(creds.source, "us-east-1");
        copy.resolve().await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(copy.is_resolved());
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let provider = Arc::new(Counting { calls: AtomicUsize::new(0), failures: 1 });
        let lazy = LazyCredentials::new(provider.clone(), None);

        assert!(lazy.resolve().await.is_err());
        assert!(!lazy.is_resolved());
        assert!(lazy.resolve().await.is_ok());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_equality_by_provider_and_region() {
        let a = LazyCredentials::new(
            Arc::new(StaticCredentialProvider::new(Credentials::new("A", "S"))),
            Some("eu-west-1".to_string()),
        );
        let b = LazyCredentials::new(
            Arc::new(StaticCredentialProvider::new(Credentials::new("B", "S"))),
            Some("eu-west-1".to_string()),
        );
        let c = LazyCredentials::new(
            Arc::new(StaticCredentialProvider::new(Credentials::new("A", "S"))),
            None,
        );

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.provider_name(), "static");
        assert_eq!(a.region(), Some("eu-west-1"));
    }
}
