//! Core traits and types for credential discovery

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Access credentials for an S3-compatible object store
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Temporary session token, when the keys are short-lived
    pub session_token: Option<String>,
    /// Which provider discovered the credentials
    pub source: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            source: "static".to_string(),
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .field("source", &self.source)
            .finish()
    }
}

/// Inputs available to a provider when discovery runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialContext {
    /// Region the client will talk to, if configured
    pub region: Option<String>,
}

/// Errors that can occur during credential discovery
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The provider has nothing to offer; a chain moves on to the next one
    #[error("No credentials from {0}")]
    NotFound(String),

    /// The provider found credentials but they are unusable
    #[error("Invalid credentials from {provider}: {reason}")]
    Invalid { provider: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Every provider in a chain reported `NotFound`
    #[error("Could not load credentials from any provider in the chain ({})", .0.join(", "))]
    ChainExhausted(Vec<String>),
}

impl CredentialError {
    pub fn invalid(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Capability that discovers object store credentials
///
/// Implementations may probe the environment, the filesystem, or the
/// network. Discovery is only invoked by the backend client, never during
/// configuration resolution.
///
/// # Example
///
/// ```
/// use integrations_core::credentials::{
///     CredentialContext, CredentialProvider, Credentials, StaticCredentialProvider,
/// };
///
/// # tokio_test_block(async {
/// let provider = StaticCredentialProvider::new(Credentials::new("AKID", "SECRET"));
/// let creds = provider.provide(&CredentialContext::default()).await.unwrap();
/// assert_eq!(creds.access_key_id, "AKID");
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f);
/// # }
/// ```
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Discover credentials
    ///
    /// Return `CredentialError::NotFound` when this provider simply has no
    /// credentials, so chains can fall through to the next provider.
    async fn provide(&self, context: &CredentialContext) -> CredentialResult<Credentials>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("AKID", "very-secret").with_session_token("token-value");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("token-value"));
    }

    #[test]
    fn test_chain_exhausted_message() {
        let err = CredentialError::ChainExhausted(vec!["env".to_string(), "profile".to_string()]);
        assert!(err.to_string().contains("env, profile"));
    }
}
