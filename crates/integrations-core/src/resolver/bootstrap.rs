//! Startup composition of the three backend resolvers

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::error::ConfigError;
use super::logger::LoggerResolver;
use super::queue::QueueResolver;
use super::storage::StorageResolver;
use super::BackendResolver;
use crate::credentials::{default_credential_chain, CredentialError, CredentialProvider};
use crate::environment::{Environment, MemoryEnvironment, ProcessEnvironment};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::types::{LoggerConfig, QueueConfig, StorageConfig};
use crate::log_info;

/// Errors that stop the process from starting
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Object storage credentials: {0}")]
    Credentials(#[from] CredentialError),
}

/// The three resolved backend configurations
///
/// Each part is meant to be handed once to its backend initializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationConfig {
    pub storage: StorageConfig,
    pub logger: LoggerConfig,
    pub message_queue: QueueConfig,
}

impl IntegrationConfig {
    /// Split into the per-backend configs
    pub fn into_parts(self) -> (StorageConfig, LoggerConfig, QueueConfig) {
        (self.storage, self.logger, self.message_queue)
    }

    /// Pretty JSON rendering; credentials are never included
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Resolves storage, logger and message queue configuration at startup
///
/// Every resolver runs exactly once against the same environment. The first
/// failure aborts the whole bootstrap; there is no partial result.
///
/// # Example
///
/// ```
/// use integrations_core::credentials::{Credentials, StaticCredentialProvider};
/// use integrations_core::environment::MemoryEnvironment;
/// use integrations_core::resolver::IntegrationBootstrap;
/// use std::sync::Arc;
///
/// let env = MemoryEnvironment::new()
///     .with("STORAGE_TYPE", "s3")
///     .with("LOGGER_DRIVER", "console")
///     .with("MESSAGE_QUEUE_TYPE", "bull-mq");
///
/// let credentials = Arc::new(StaticCredentialProvider::new(Credentials::new("AKID", "SECRET")));
/// let config = IntegrationBootstrap::new(credentials).resolve(&env).unwrap();
/// let (storage, logger, queue) = config.into_parts();
/// ```
pub struct IntegrationBootstrap {
    storage: StorageResolver,
    logger: LoggerResolver,
    message_queue: QueueResolver,
    log: SharedLogger,
}

impl IntegrationBootstrap {
    /// Bootstrap with default resolvers and the given credential capability
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_resolvers(
            StorageResolver::new(credentials),
            LoggerResolver::new(),
            QueueResolver::new(),
        )
    }

    /// Bootstrap with preconfigured resolvers
    pub fn with_resolvers(
        storage: StorageResolver,
        logger: LoggerResolver,
        message_queue: QueueResolver,
    ) -> Self {
        Self {
            storage,
            logger,
            message_queue,
            log: Arc::new(NoOpLogger),
        }
    }

    /// Route diagnostics from the bootstrap and all three resolvers to `logger`
    pub fn with_logger(self, logger: SharedLogger) -> Self {
        Self {
            storage: self.storage.with_logger(logger.clone()),
            logger: self.logger.with_logger(logger.clone()),
            message_queue: self.message_queue.with_logger(logger.clone()),
            log: logger,
        }
    }

    /// Snapshot the process environment and resolve against it
    ///
    /// Credentials come from the default chain over the same snapshot.
    pub fn from_process(logger: SharedLogger) -> Result<IntegrationConfig, BootstrapError> {
        let snapshot: Arc<dyn Environment> = Arc::new(ProcessEnvironment::snapshot());
        Self::for_environment(snapshot, logger)
    }

    /// Freeze `env` and resolve against it, with default credential discovery
    pub fn for_environment(
        env: Arc<dyn Environment>,
        logger: SharedLogger,
    ) -> Result<IntegrationConfig, BootstrapError> {
        let snapshot: Arc<dyn Environment> = Arc::new(MemoryEnvironment::snapshot_of(env.as_ref()));
        let credentials = Arc::new(default_credential_chain(snapshot.clone()));
        let config = Self::new(credentials)
            .with_logger(logger)
            .resolve(snapshot.as_ref())?;
        Ok(config)
    }

    /// Resolve all three concerns; credentials stay undiscovered
    pub fn resolve(&self, env: &dyn Environment) -> Result<IntegrationConfig, ConfigError> {
        log_info!(self.log, "resolving integrations from {} environment", env.name());

        let config = IntegrationConfig {
            storage: self.storage.resolve(env)?,
            logger: self.logger.resolve(env)?,
            message_queue: self.message_queue.resolve(env)?,
        };

        log_info!(
            self.log,
            "integrations resolved: storage={}, logger={}, message_queue={}",
            config.storage.kind(),
            config.logger.kind(),
            config.message_queue.kind()
        );
        Ok(config)
    }

    /// Resolve, then wait for object store credential discovery to finish
    ///
    /// For hosts that want missing credentials to fail at startup rather than
    /// on the first storage call.
    pub async fn resolve_with_credentials(
        &self,
        env: &dyn Environment,
    ) -> Result<IntegrationConfig, BootstrapError> {
        let config = self.resolve(env)?;
        if let Some(options) = config.storage.object_store() {
            let credentials = options.credentials.resolve().await?;
            log_info!(self.log, "object storage credentials loaded from {}", credentials.source);
        }
        Ok(config)
    }
}

impl std::fmt::Debug for IntegrationBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationBootstrap")
            .field("storage", &self.storage)
            .field("logger", &self.logger)
            .field("message_queue", &self.message_queue)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use crate::credentials::{Credentials, StaticCredentialProvider};
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::types::{
        BackendKind, ErrorTrackerOptions, LocalStorageOptions, LoggerKind, QueueKind,
        RedisQueueOptions, StorageKind,
    };

    fn bootstrap() -> IntegrationBootstrap {
        let credentials = Arc::new(StaticCredentialProvider::new(Credentials::new("AKID", "SECRET")));
        IntegrationBootstrap::with_resolvers(
            StorageResolver::new(credentials).with_working_dir("/srv/app"),
            LoggerResolver::new(),
            QueueResolver::new(),
        )
    }

    fn full_env(storage: StorageKind, logger: LoggerKind, queue: QueueKind) -> MemoryEnvironment {
        MemoryEnvironment::new()
            .with("STORAGE_TYPE", storage.as_str())
            .with("STORAGE_LOCAL_PATH", "data/files")
            .with("STORAGE_S3_NAME", "attachments")
            .with("STORAGE_S3_ENDPOINT", "http://minio:9000")
            .with("STORAGE_S3_REGION", "us-east-1")
            .with("LOGGER_DRIVER", logger.as_str())
            .with("SENTRY_DSN", "https://key@sentry.example/1")
            .with("MESSAGE_QUEUE_TYPE", queue.as_str())
            .with("PG_DATABASE_URL", "postgres://localhost/app")
            .with("REDIS_HOST", "localhost")
            .with("REDIS_PORT", "6379")
    }

    #[test]
    fn test_every_kind_combination_is_tagged_correctly() {
        for storage in StorageKind::all() {
            for logger in LoggerKind::all() {
                for queue in QueueKind::all() {
                    let env = full_env(*storage, *logger, *queue);
                    let config = bootstrap().resolve(&env).unwrap();
                    assert_eq!(config.storage.kind(), *storage);
                    assert_eq!(config.logger.kind(), *logger);
                    assert_eq!(config.message_queue.kind(), *queue);
                }
            }
        }
    }

    #[test]
    fn test_scenarios() {
        let env = MemoryEnvironment::new()
            .with("STORAGE_TYPE", "local")
            .with("STORAGE_LOCAL_PATH", "data/files")
            .with("LOGGER_DRIVER", "sentry")
            .with("MESSAGE_QUEUE_TYPE", "bull-mq")
            .with("REDIS_HOST", "localhost")
            .with("REDIS_PORT", "6379");

        let (storage, logger, queue) = bootstrap().resolve(&env).unwrap().into_parts();
        assert_eq!(
            storage,
            StorageConfig::Local(LocalStorageOptions { root_path: PathBuf::from("/srv/app/data/files") })
        );
        assert_eq!(logger, LoggerConfig::RemoteErrorTracker(ErrorTrackerOptions { dsn: String::new() }));
        assert_eq!(
            queue,
            QueueConfig::RedisBacked(RedisQueueOptions { host: "localhost".to_string(), port: 6379 })
        );
    }

    #[test]
    fn test_any_failure_aborts_bootstrap() {
        let env = full_env(StorageKind::Local, LoggerKind::Console, QueueKind::RedisBacked);
        env.set("LOGGER_DRIVER", "invalid-value");

        let err = bootstrap().resolve(&env).unwrap_err();
        assert!(err.to_string().contains("invalid-value"));

        let env = full_env(StorageKind::Local, LoggerKind::Console, QueueKind::RedisBacked);
        env.set("MESSAGE_QUEUE_TYPE", "kafka");
        assert!(matches!(
            bootstrap().resolve(&env),
            Err(ConfigError::UnrecognizedBackendKind { .. })
        ));
    }

    #[test]
    fn test_resolving_twice_is_structurally_equal() {
        let env = full_env(StorageKind::RemoteObjectStore, LoggerKind::RemoteErrorTracker, QueueKind::DatabaseBacked);
        let bootstrap = bootstrap();
        assert_eq!(bootstrap.resolve(&env).unwrap(), bootstrap.resolve(&env).unwrap());
    }

    #[test]
    fn test_logger_is_shared_with_resolvers() {
        let logger = Arc::new(MemoryLogger::new());
        let env = full_env(StorageKind::RemoteObjectStore, LoggerKind::Console, QueueKind::DatabaseBacked);
        env.remove("STORAGE_S3_NAME");

        bootstrap().with_logger(logger.clone()).resolve(&env).unwrap();
        assert!(logger.contains(LogLevel::Warn, "STORAGE_S3_NAME"));
        assert!(logger.contains(LogLevel::Info, "storage=s3, logger=console, message_queue=pg-boss"));
    }

    #[test]
    fn test_json_excludes_credentials() {
        let env = full_env(StorageKind::RemoteObjectStore, LoggerKind::Console, QueueKind::RedisBacked);
        let json = bootstrap().resolve(&env).unwrap().to_json().unwrap();

        assert!(json.contains("\"bucketName\": \"attachments\""));
        assert!(json.contains("\"message_queue\""));
        assert!(!json.contains("AKID"));
        assert!(!json.contains("SECRET"));
    }

    #[tokio::test]
    async fn test_resolve_with_credentials_awaits_discovery() {
        let env = full_env(StorageKind::RemoteObjectStore, LoggerKind::Console, QueueKind::RedisBacked);
        let config = bootstrap().resolve_with_credentials(&env).await.unwrap();
        assert!(config.storage.object_store().unwrap().credentials.is_resolved());
    }

    #[tokio::test]
    async fn test_resolve_with_credentials_fails_without_credentials() {
        let env: Arc<dyn Environment> = Arc::new(
            full_env(StorageKind::RemoteObjectStore, LoggerKind::Console, QueueKind::RedisBacked)
                .with("AWS_SHARED_CREDENTIALS_FILE", "/nonexistent/credentials"),
        );
        let credentials = Arc::new(default_credential_chain(env.clone()));

        let result = IntegrationBootstrap::new(credentials)
            .resolve_with_credentials(env.as_ref())
            .await;
        assert!(matches!(
            result,
            Err(BootstrapError::Credentials(CredentialError::ChainExhausted(_)))
        ));
    }

    #[test]
    fn test_for_environment_uses_snapshot() {
        let source = Arc::new(
            MemoryEnvironment::new()
                .with("STORAGE_TYPE", "local")
                .with("STORAGE_LOCAL_PATH", "/var/lib/files")
                .with("MESSAGE_QUEUE_TYPE", "bull-mq"),
        );

        let config = IntegrationBootstrap::for_environment(source, Arc::new(NoOpLogger)).unwrap();
        assert_eq!(config.storage.local_root(), Some(Path::new("/var/lib/files")));
        assert_eq!(config.logger, LoggerConfig::Console);
        assert_eq!(config.message_queue.kind(), QueueKind::RedisBacked);
    }
}
