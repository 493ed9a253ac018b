//! Backend kinds, one closed enumeration per infrastructure concern

use std::fmt;

use serde::Serialize;

/// The infrastructure concern a backend kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Concern {
    /// Durable object storage
    Storage,
    /// Diagnostic logging
    Logger,
    /// Asynchronous task queueing
    MessageQueue,
}

impl Concern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Concern::Storage => "storage",
            Concern::Logger => "logger",
            Concern::MessageQueue => "message queue",
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed set of backend implementations for one concern
///
/// Kinds are parsed case-insensitively from their canonical name or one of
/// their aliases. The canonical name is what appears in configuration files
/// and in serialized configs.
pub trait BackendKind: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Concern this kind selects a backend for
    const CONCERN: Concern;

    /// Every member of the enumeration, default first
    fn all() -> &'static [Self];

    /// Canonical configuration value
    fn as_str(&self) -> &'static str;

    /// Additional accepted spellings
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Kind used when the setting is absent
    fn default_kind() -> Self {
        Self::all()[0]
    }

    /// Parse a raw configuration value
    fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        Self::all().iter().copied().find(|kind| {
            kind.as_str() == needle || kind.aliases().iter().any(|alias| *alias == needle)
        })
    }

    /// Comma-separated list of canonical values, for error messages
    fn expected() -> String {
        Self::all()
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StorageKind {
    /// Files on the local disk under a root directory
    #[serde(rename = "local")]
    Local,
    /// S3-compatible remote object store
    #[serde(rename = "s3")]
    RemoteObjectStore,
}

impl BackendKind for StorageKind {
    const CONCERN: Concern = Concern::Storage;

    fn all() -> &'static [Self] {
        &[StorageKind::Local, StorageKind::RemoteObjectStore]
    }

    fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Local => "local",
            StorageKind::RemoteObjectStore => "s3",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            StorageKind::Local => &[],
            StorageKind::RemoteObjectStore => &["object-store"],
        }
    }
}

/// Logger backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LoggerKind {
    /// Process console output
    #[serde(rename = "console")]
    Console,
    /// Remote error tracker (Sentry)
    #[serde(rename = "sentry")]
    RemoteErrorTracker,
}

impl BackendKind for LoggerKind {
    const CONCERN: Concern = Concern::Logger;

    fn all() -> &'static [Self] {
        &[LoggerKind::Console, LoggerKind::RemoteErrorTracker]
    }

    fn as_str(&self) -> &'static str {
        match self {
            LoggerKind::Console => "console",
            LoggerKind::RemoteErrorTracker => "sentry",
        }
    }
}

/// Message queue backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueueKind {
    /// Jobs stored in the Postgres database (pg-boss)
    #[serde(rename = "pg-boss")]
    DatabaseBacked,
    /// Jobs stored in Redis (BullMQ)
    #[serde(rename = "bull-mq")]
    RedisBacked,
}

impl BackendKind for QueueKind {
    const CONCERN: Concern = Concern::MessageQueue;

    fn all() -> &'static [Self] {
        &[QueueKind::DatabaseBacked, QueueKind::RedisBacked]
    }

    fn as_str(&self) -> &'static str {
        match self {
            QueueKind::DatabaseBacked => "pg-boss",
            QueueKind::RedisBacked => "bull-mq",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            QueueKind::DatabaseBacked => &["pgboss", "pg_boss"],
            QueueKind::RedisBacked => &["bullmq", "bull_mq"],
        }
    }
}

macro_rules! impl_kind_display {
    ($($kind:ty),*) => {
        $(
            impl fmt::Display for $kind {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_kind_display!(StorageKind, LoggerKind, QueueKind);
