//! Fixed credentials

use async_trait::async_trait;

use super::traits::{CredentialContext, CredentialProvider, CredentialResult, Credentials};

/// Credential provider that always returns the same credentials
///
/// Useful for tests and for hosts that obtain credentials some other way.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: Credentials,
}

impl StaticCredentialProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn provide(&self, _context: &CredentialContext) -> CredentialResult<Credentials> {
        Ok(self.credentials.clone())
    }
}
