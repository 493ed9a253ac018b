//! Credentials from environment settings

use std::sync::Arc;

use async_trait::async_trait;

use super::traits::{CredentialContext, CredentialError, CredentialProvider, CredentialResult, Credentials};
use crate::environment::{Environment, EnvironmentExt};

/// Which setting names can carry each credential part, in lookup order
struct CredentialKeys {
    access_key_id: &'static [&'static str],
    secret_access_key: &'static [&'static str],
    session_token: &'static [&'static str],
}

static AWS_KEYS: CredentialKeys = CredentialKeys {
    access_key_id: &["AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY"],
    secret_access_key: &["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY"],
    session_token: &["AWS_SESSION_TOKEN"],
};

/// Credential provider that reads the standard AWS settings
///
/// Reads from an injected [`Environment`] rather than the process directly,
/// so it can share the startup snapshot the resolvers use.
///
/// # Setting Mapping
///
/// - access key id: `AWS_ACCESS_KEY_ID` or `AWS_ACCESS_KEY`
/// - secret key: `AWS_SECRET_ACCESS_KEY` or `AWS_SECRET_KEY`
/// - session token: `AWS_SESSION_TOKEN` (optional)
pub struct EnvCredentialProvider {
    env: Arc<dyn Environment>,
}

impl EnvCredentialProvider {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.env.setting(key))
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn provide(&self, _context: &CredentialContext) -> CredentialResult<Credentials> {
        let access_key_id = self.first_of(AWS_KEYS.access_key_id);
        let secret_access_key = self.first_of(AWS_KEYS.secret_access_key);

        match (access_key_id, secret_access_key) {
            (None, None) => Err(CredentialError::NotFound(self.name().to_string())),
            (Some(_), None) => Err(CredentialError::invalid(
                self.name(),
                "access key id is set but the secret access key is missing",
            )),
            (None, Some(_)) => Err(CredentialError::invalid(
                self.name(),
                "secret access key is set but the access key id is missing",
            )),
            (Some(id), Some(secret)) => {
                let mut credentials = Credentials::new(id, secret).with_source(self.name());
                credentials.session_token = self.first_of(AWS_KEYS.session_token);
                Ok(credentials)
            }
        }
    }
}

impl std::fmt::Debug for EnvCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredentialProvider")
            .field("env", &self.env.name())
            .finish()
    }
}
