//! Chained credential providers with fallback behavior

use std::sync::Arc;

use async_trait::async_trait;

use super::env_provider::EnvCredentialProvider;
use super::profile_provider::ProfileCredentialProvider;
use super::traits::{CredentialContext, CredentialError, CredentialProvider, CredentialResult, Credentials};
use crate::environment::Environment;

/// A credential provider that tries several providers in order
///
/// A provider answering `NotFound` hands over to the next one. Any other
/// error stops the chain, since half-configured credentials are a defect
/// that falling back would hide.
///
/// # Example
///
/// ```
/// use integrations_core::credentials::{ChainCredentialProvider, Credentials, StaticCredentialProvider};
/// use std::sync::Arc;
///
/// let chain = ChainCredentialProvider::new(vec![
///     Arc::new(StaticCredentialProvider::new(Credentials::new("AKID", "SECRET"))),
/// ]);
/// assert_eq!(chain.providers().len(), 1);
/// ```
pub struct ChainCredentialProvider {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainCredentialProvider {
    /// Create a new chain; providers are tried in order
    pub fn new(providers: Vec<Arc<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Get the providers in this chain
    pub fn providers(&self) -> &[Arc<dyn CredentialProvider>] {
        &self.providers
    }
}

/// Default discovery order: environment settings, then the shared profile file
pub fn default_credential_chain(env: Arc<dyn Environment>) -> ChainCredentialProvider {
    let profile = ProfileCredentialProvider::from_environment(&env);
    ChainCredentialProvider::new(vec![
        Arc::new(EnvCredentialProvider::new(env)),
        Arc::new(profile),
    ])
}

#[async_trait]
impl CredentialProvider for ChainCredentialProvider {
    fn name(&self) -> &str {
        "chain"
    }

    async fn provide(&self, context: &CredentialContext) -> CredentialResult<Credentials> {
        let mut tried = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match provider.provide(context).await {
                Ok(credentials) => return Ok(credentials),
                Err(CredentialError::NotFound(name)) => tried.push(name),
                Err(e) => return Err(e),
            }
        }

        Err(CredentialError::ChainExhausted(tried))
    }
}

// Arc<dyn CredentialProvider> doesn't implement Debug
impl std::fmt::Debug for ChainCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("ChainCredentialProvider")
            .field("providers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialProvider;
    use crate::environment::MemoryEnvironment;

    struct Missing(&'static str);

    #[async_trait]
    impl CredentialProvider for Missing {
        fn name(&self) -> &str {
            self.0
        }

        async fn provide(&self, _context: &CredentialContext) -> CredentialResult<Credentials> {
            Err(CredentialError::NotFound(self.0.to_string()))
        }
    }

    struct Broken;

    #[async_trait]
    impl CredentialProvider for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn provide(&self, _context: &CredentialContext) -> CredentialResult<Credentials> {
            Err(CredentialError::invalid("broken", "bad file"))
        }
    }

    fn fixed(id: &str) -> Arc<dyn CredentialProvider> {
        Arc::new(StaticCredentialProvider::new(Credentials::new(id, "SECRET")))
    }

    #[tokio::test]
    async fn test_chain_falls_through_not_found() {
        let chain = ChainCredentialProvider::new(vec![Arc::new(Missing("first")), fixed("SECOND")]);
        let creds = chain.provide(&CredentialContext::default()).await.unwrap();
        assert_eq!(creds.access_key_id, "SECOND");
    }

    #[tokio::test]
    async fn test_chain_priority() {
        let chain = ChainCredentialProvider::new(vec![fixed("FIRST"), fixed("SECOND")]);
        let creds = chain.provide(&CredentialContext::default()).await.unwrap();
        assert_eq!(creds.access_key_id, "FIRST");
    }

    #[tokio::test]
    async fn test_chain_stops_on_hard_error() {
        let chain = ChainCredentialProvider::new(vec![Arc::new(Broken), fixed("NEVER")]);
        assert!(matches!(
            chain.provide(&CredentialContext::default()).await,
            Err(CredentialError::Invalid { .. })
        ));
    }

    #[tokio::test]
    async fn test_chain_exhausted_lists_providers() {
        let chain = ChainCredentialProvider::new(vec![Arc::new(Missing("a")), Arc::new(Missing("b"))]);
        match chain.provide(&CredentialContext::default()).await {
            Err(CredentialError::ChainExhausted(tried)) => assert_eq!(tried, vec!["a", "b"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_default_chain_prefers_environment() {
        let env: Arc<dyn Environment> = Arc::new(
            MemoryEnvironment::new()
                .with("AWS_ACCESS_KEY_ID", "AKIDENV")
                .with("AWS_SECRET_ACCESS_KEY", "SECRET")
                .with("AWS_SHARED_CREDENTIALS_FILE", "/nonexistent/credentials"),
        );
        let chain = default_credential_chain(env);
        let names: Vec<&str> = chain.providers().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["env", "profile"]);

        let creds = chain.provide(&CredentialContext::default()).await.unwrap();
        assert_eq!(creds.source, "env");
    }
}
