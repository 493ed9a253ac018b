//! Backend selection from environment settings
//!
//! One resolver per infrastructure concern, plus the bootstrap that runs
//! all three at startup:
//! - `StorageResolver`: `STORAGE_TYPE` → `StorageConfig`
//! - `LoggerResolver`: `LOGGER_DRIVER` → `LoggerConfig`
//! - `QueueResolver`: `MESSAGE_QUEUE_TYPE` → `QueueConfig`
//! - `IntegrationBootstrap`: all of the above against one snapshot

mod error;
mod storage;
mod logger;
mod queue;
mod bootstrap;

pub use error::{ConfigError, ConfigResult};
pub use storage::{StorageResolver, StorageSettingKeys};
pub use logger::{LoggerResolver, LoggerSettingKeys};
pub use queue::{QueueResolver, QueueSettingKeys};
pub use bootstrap::{IntegrationBootstrap, IntegrationConfig, BootstrapError};

use crate::environment::Environment;
use crate::types::BackendKind;

/// Resolver for one infrastructure concern
///
/// Resolvers are stateless: resolving twice against the same environment
/// yields equal configs, and different resolvers may run concurrently.
pub trait BackendResolver: Send + Sync {
    /// Kind enumeration this resolver selects from
    type Kind: BackendKind;

    /// Tagged configuration produced
    type Output;

    /// Read the settings and build the tagged config
    fn resolve(&self, env: &dyn Environment) -> ConfigResult<Self::Output>;
}
