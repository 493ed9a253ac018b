//! Integrations Core
//!
//! Environment-driven backend selection for the three infrastructure
//! concerns a server wires at startup: file storage, logging and the
//! message queue. Each concern has a closed set of backend kinds; the
//! resolvers read the kind setting plus its parameters and produce a tagged
//! configuration that the backend initializers consume.
//!
//! Resolution never connects to anything. Object store credentials are
//! carried as a lazy reference and discovered on first use.
//!
//! ## Startup
//!
//! ```rust,ignore
//! use integrations_core::{IntegrationBootstrap, TracingLogger};
//! use std::sync::Arc;
//!
//! let config = IntegrationBootstrap::from_process(Arc::new(TracingLogger))?;
//! let (storage, logger, queue) = config.into_parts();
//! file_storage::init(storage);
//! ```
//!
//! ## Testing
//!
//! Resolvers take any [`Environment`], so tests use an in-memory one:
//!
//! ```rust
//! use integrations_core::{BackendResolver, LoggerConfig, LoggerResolver, MemoryEnvironment};
//!
//! let env = MemoryEnvironment::new().with("LOGGER_DRIVER", "console");
//! assert_eq!(LoggerResolver::new().resolve(&env).unwrap(), LoggerConfig::Console);
//! ```

pub mod types;
pub mod environment;
pub mod credentials;
pub mod logging;
pub mod resolver;

// Re-export commonly used types
pub use types::{
    BackendKind, Concern,
    StorageKind, StorageConfig, LocalStorageOptions, ObjectStoreOptions,
    LoggerKind, LoggerConfig, ErrorTrackerOptions,
    QueueKind, QueueConfig, DatabaseQueueOptions, RedisQueueOptions,
};

pub use environment::{
    Environment, EnvironmentExt,
    ProcessEnvironment, MemoryEnvironment, FileEnvironment, ChainEnvironment,
};

pub use credentials::{
    CredentialProvider, Credentials, CredentialError, LazyCredentials,
    ChainCredentialProvider, StaticCredentialProvider, default_credential_chain,
};

pub use logging::{Logger, SharedLogger, NoOpLogger, ConsoleLogger, TracingLogger, MemoryLogger};

pub use resolver::{
    BackendResolver, ConfigError, ConfigResult,
    StorageResolver, LoggerResolver, QueueResolver,
    IntegrationBootstrap, IntegrationConfig, BootstrapError,
};
