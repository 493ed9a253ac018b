//! Logger driver resolution

use std::sync::Arc;

use super::error::ConfigResult;
use super::BackendResolver;
use crate::environment::{Environment, EnvironmentExt};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::types::{ErrorTrackerOptions, LoggerConfig, LoggerKind};
use crate::{log_error, log_info, log_warn};

/// Setting names read by [`LoggerResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettingKeys {
    pub kind: String,
    pub dsn: String,
}

impl Default for LoggerSettingKeys {
    fn default() -> Self {
        Self {
            kind: "LOGGER_DRIVER".to_string(),
            dsn: "SENTRY_DSN".to_string(),
        }
    }
}

/// Resolves the logger settings into a [`LoggerConfig`]
///
/// A `sentry` driver without a DSN resolves with an empty DSN; the tracker
/// client decides what to do with it.
#[derive(Clone)]
pub struct LoggerResolver {
    keys: LoggerSettingKeys,
    logger: SharedLogger,
}

impl Default for LoggerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerResolver {
    pub fn new() -> Self {
        Self {
            keys: LoggerSettingKeys::default(),
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_keys(mut self, keys: LoggerSettingKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn keys(&self) -> &LoggerSettingKeys {
        &self.keys
    }
}

impl BackendResolver for LoggerResolver {
    type Kind = LoggerKind;
    type Output = LoggerConfig;

    fn resolve(&self, env: &dyn Environment) -> ConfigResult<LoggerConfig> {
        let kind = env
            .backend_kind::<LoggerKind>(&self.keys.kind)
            .map_err(|e| {
                log_error!(self.logger, "{}", e);
                e
            })?;

        let config = match kind {
            LoggerKind::Console => LoggerConfig::Console,
            LoggerKind::RemoteErrorTracker => {
                let dsn = env.setting(&self.keys.dsn).unwrap_or_else(|| {
                    log_warn!(self.logger, "{} is not set, using an empty value", self.keys.dsn);
                    String::new()
                });
                LoggerConfig::RemoteErrorTracker(ErrorTrackerOptions { dsn })
            }
        };

        log_info!(self.logger, "logger: {}", config.kind());
        Ok(config)
    }
}

impl std::fmt::Debug for LoggerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerResolver")
            .field("keys", &self.keys)
            .finish()
    }
}
