//! Message queue backend resolution

use std::sync::Arc;

use super::error::ConfigResult;
use super::BackendResolver;
use crate::environment::{Environment, EnvironmentExt};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::types::{DatabaseQueueOptions, QueueConfig, QueueKind, RedisQueueOptions};
use crate::{log_error, log_info};

const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: u16 = 6379;

/// Setting names read by [`QueueResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSettingKeys {
    pub kind: String,
    pub connection_string: String,
    pub redis_host: String,
    pub redis_port: String,
}

impl Default for QueueSettingKeys {
    fn default() -> Self {
        Self {
            kind: "MESSAGE_QUEUE_TYPE".to_string(),
            connection_string: "PG_DATABASE_URL".to_string(),
            redis_host: "REDIS_HOST".to_string(),
            redis_port: "REDIS_PORT".to_string(),
        }
    }
}

/// Resolves the message queue settings into a [`QueueConfig`]
///
/// `pg-boss` requires the database URL. `bull-mq` falls back to
/// `127.0.0.1:6379` and rejects ports that are not a valid `u16`.
#[derive(Clone)]
pub struct QueueResolver {
    keys: QueueSettingKeys,
    logger: SharedLogger,
}

impl Default for QueueResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueResolver {
    pub fn new() -> Self {
        Self {
            keys: QueueSettingKeys::default(),
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_keys(mut self, keys: QueueSettingKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn keys(&self) -> &QueueSettingKeys {
        &self.keys
    }

    fn resolve_kind(&self, env: &dyn Environment, kind: QueueKind) -> ConfigResult<QueueConfig> {
        match kind {
            QueueKind::DatabaseBacked => {
                let connection_string = env.require(&self.keys.connection_string, kind)?;
                log_info!(self.logger, "message queue: pg-boss");
                Ok(QueueConfig::DatabaseBacked(DatabaseQueueOptions { connection_string }))
            }
            QueueKind::RedisBacked => {
                let host = env.setting_or(&self.keys.redis_host, DEFAULT_REDIS_HOST);
                let port = env
                    .parsed::<u16>(&self.keys.redis_port)?
                    .unwrap_or(DEFAULT_REDIS_PORT);
                log_info!(self.logger, "message queue: bull-mq at {}:{}", host, port);
                Ok(QueueConfig::RedisBacked(RedisQueueOptions { host, port }))
            }
        }
    }
}

impl BackendResolver for QueueResolver {
    type Kind = QueueKind;
    type Output = QueueConfig;

    fn resolve(&self, env: &dyn Environment) -> ConfigResult<QueueConfig> {
        env.backend_kind::<QueueKind>(&self.keys.kind)
            .and_then(|kind| self.resolve_kind(env, kind))
            .map_err(|e| {
                log_error!(self.logger, "{}", e);
                e
            })
    }
}

impl std::fmt::Debug for QueueResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueResolver")
            .field("keys", &self.keys)
            .finish()
    }
}
