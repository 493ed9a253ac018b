//! Credentials from the shared AWS credentials file

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use super::traits::{CredentialContext, CredentialError, CredentialProvider, CredentialResult, Credentials};
use crate::environment::{Environment, EnvironmentExt};

const DEFAULT_PROFILE: &str = "default";

static DEFAULT_CREDENTIALS_PATH: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::home_dir().map(|home| home.join(".aws").join("credentials")));

/// Credential provider that reads a profile from `~/.aws/credentials`
///
/// The profile is `AWS_PROFILE` (or `default`), and the file location can be
/// overridden with `AWS_SHARED_CREDENTIALS_FILE`. The file is only read when
/// [`CredentialProvider::provide`] is awaited.
pub struct ProfileCredentialProvider {
    profile: String,
    path: Option<PathBuf>,
}

impl ProfileCredentialProvider {
    /// Create a provider for an explicit profile and file
    pub fn new(profile: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            profile: profile.into(),
            path,
        }
    }

    /// Create a provider configured from environment settings
    pub fn from_environment(env: &Arc<dyn Environment>) -> Self {
        let profile = env.setting_or("AWS_PROFILE", DEFAULT_PROFILE);
        let path = env
            .setting("AWS_SHARED_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .or_else(Self::default_path);
        Self::new(profile, path)
    }

    /// `~/.aws/credentials`, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        DEFAULT_CREDENTIALS_PATH.clone()
    }

    /// Get the profile name
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Get the credentials file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parse the `[section]` / `key = value` format of the credentials file
    fn parse_profiles(content: &str) -> HashMap<String, HashMap<String, String>> {
        let mut profiles: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                // the config file spells non-default profiles as "profile name"
                let name = section.trim();
                let name = name.strip_prefix("profile ").unwrap_or(name).trim();
                profiles.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            if let (Some(profile), Some((key, value))) = (&current, line.split_once('=')) {
                if let Some(entries) = profiles.get_mut(profile) {
                    entries.insert(key.trim().to_lowercase(), value.trim().to_string());
                }
            }
        }

        profiles
    }
}

#[async_trait]
impl CredentialProvider for ProfileCredentialProvider {
    fn name(&self) -> &str {
        "profile"
    }

    async fn provide(&self, _context: &CredentialContext) -> CredentialResult<Credentials> {
        let Some(path) = &self.path else {
            return Err(CredentialError::NotFound(self.name().to_string()));
        };

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CredentialError::NotFound(self.name().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let profiles = Self::parse_profiles(&content);
        let Some(entries) = profiles.get(&self.profile) else {
            return Err(CredentialError::NotFound(format!(
                "{} ({})",
                self.name(),
                self.profile
            )));
        };

        let access_key_id = entries.get("aws_access_key_id").cloned().ok_or_else(|| {
            CredentialError::invalid(
                self.name(),
                format!("profile {} has no aws_access_key_id", self.profile),
            )
        })?;
        let secret_access_key = entries.get("aws_secret_access_key").cloned().ok_or_else(|| {
            CredentialError::invalid(
                self.name(),
                format!("profile {} has no aws_secret_access_key", self.profile),
            )
        })?;

        let mut credentials = Credentials::new(access_key_id, secret_access_key)
            .with_source(format!("{}:{}", self.name(), self.profile));
        credentials.session_token = entries.get("aws_session_token").cloned();
        Ok(credentials)
    }
}

impl std::fmt::Debug for ProfileCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCredentialProvider")
            .field("profile", &self.profile)
            .field("path", &self.path)
            .finish()
    }
}
