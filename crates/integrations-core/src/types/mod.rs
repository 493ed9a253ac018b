//! Backend kinds and the tagged configurations resolved from them
//!
//! Each concern has a closed kind enumeration and a config enum with one
//! variant per kind. A variant carries only the options valid for its kind.

mod kind;
mod storage;
mod logger;
mod queue;

pub use kind::{BackendKind, Concern, StorageKind, LoggerKind, QueueKind};
pub use storage::{StorageConfig, LocalStorageOptions, ObjectStoreOptions};
pub use logger::{LoggerConfig, ErrorTrackerOptions};
pub use queue::{QueueConfig, DatabaseQueueOptions, RedisQueueOptions};
