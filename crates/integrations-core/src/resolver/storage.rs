//! File storage backend resolution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::{ConfigError, ConfigResult};
use super::BackendResolver;
use crate::credentials::{CredentialProvider, LazyCredentials};
use crate::environment::{Environment, EnvironmentExt};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::types::{LocalStorageOptions, ObjectStoreOptions, StorageConfig, StorageKind};
use crate::{log_error, log_info, log_warn};

const DEFAULT_LOCAL_PATH: &str = ".local-storage";

/// Setting names read by [`StorageResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettingKeys {
    pub kind: String,
    pub local_path: String,
    pub bucket_name: String,
    pub endpoint: String,
    pub region: String,
}

impl Default for StorageSettingKeys {
    fn default() -> Self {
        Self {
            kind: "STORAGE_TYPE".to_string(),
            local_path: "STORAGE_LOCAL_PATH".to_string(),
            bucket_name: "STORAGE_S3_NAME".to_string(),
            endpoint: "STORAGE_S3_ENDPOINT".to_string(),
            region: "STORAGE_S3_REGION".to_string(),
        }
    }
}

/// Resolves the storage settings into a [`StorageConfig`]
///
/// - `local`: the root path is joined onto the working directory, so a
///   relative `STORAGE_LOCAL_PATH` becomes absolute and an absolute one is
///   kept as-is.
/// - `s3`: bucket and region default to `""` when unset; credentials are
///   wrapped in a [`LazyCredentials`] and not discovered here.
pub struct StorageResolver {
    credentials: Arc<dyn CredentialProvider>,
    keys: StorageSettingKeys,
    working_dir: Option<PathBuf>,
    logger: SharedLogger,
}

impl StorageResolver {
    /// Create a resolver using `credentials` for the remote object store
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            keys: StorageSettingKeys::default(),
            working_dir: None,
            logger: Arc::new(NoOpLogger),
        }
    }

    /// Use custom setting names
    pub fn with_keys(mut self, keys: StorageSettingKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Resolve local paths against `dir` instead of the process working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn keys(&self) -> &StorageSettingKeys {
        &self.keys
    }

    fn base_dir(&self) -> ConfigResult<PathBuf> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(ConfigError::WorkingDirectory),
        }
    }

    fn resolve_local(&self, env: &dyn Environment) -> ConfigResult<LocalStorageOptions> {
        let raw = env.setting_or(&self.keys.local_path, DEFAULT_LOCAL_PATH);
        let root_path = self.base_dir()?.join(Path::new(&raw));
        log_info!(self.logger, "storage: local, root {}", root_path.display());
        Ok(LocalStorageOptions { root_path })
    }

    fn resolve_object_store(&self, env: &dyn Environment) -> ObjectStoreOptions {
        let bucket_name = self.permissive(env, &self.keys.bucket_name);
        let region = self.permissive(env, &self.keys.region);
        let endpoint = env.setting(&self.keys.endpoint);

        let credential_region = Some(region.clone()).filter(|r| !r.is_empty());
        let credentials = LazyCredentials::new(self.credentials.clone(), credential_region);

        log_info!(
            self.logger,
            "storage: s3, bucket '{}', region '{}', endpoint {}, credentials via {}",
            bucket_name,
            region,
            endpoint.as_deref().unwrap_or("default"),
            credentials.provider_name()
        );

        ObjectStoreOptions {
            bucket_name,
            endpoint,
            region,
            force_path_style: true,
            credentials,
        }
    }

    /// Optional object store parameter; absent means empty, not an error
    fn permissive(&self, env: &dyn Environment, key: &str) -> String {
        env.setting(key).unwrap_or_else(|| {
            log_warn!(self.logger, "{} is not set, using an empty value", key);
            String::new()
        })
    }
}

impl BackendResolver for StorageResolver {
    type Kind = StorageKind;
    type Output = StorageConfig;

    fn resolve(&self, env: &dyn Environment) -> ConfigResult<StorageConfig> {
        let kind = env
            .backend_kind::<StorageKind>(&self.keys.kind)
            .map_err(|e| {
                log_error!(self.logger, "{}", e);
                e
            })?;

        match kind {
            StorageKind::Local => self.resolve_local(env).map(StorageConfig::Local),
            StorageKind::RemoteObjectStore => {
                Ok(StorageConfig::RemoteObjectStore(self.resolve_object_store(env)))
            }
        }
    }
}

impl std::fmt::Debug for StorageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageResolver")
            .field("credentials", &self.credentials.name())
            .field("keys", &self.keys)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}
