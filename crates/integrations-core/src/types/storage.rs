//! Resolved file storage configuration

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::kind::StorageKind;
use crate::credentials::LazyCredentials;

/// Options for the local-disk storage driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalStorageOptions {
    /// Absolute directory files are stored under
    pub root_path: PathBuf,
}

/// Options for the S3-compatible storage driver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStoreOptions {
    /// Bucket name, empty when not configured
    pub bucket_name: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Region, empty when not configured
    pub region: String,
    /// Always true so that custom endpoints work without virtual-host DNS
    pub force_path_style: bool,
    /// Credentials discovered lazily on first use
    #[serde(skip)]
    pub credentials: LazyCredentials,
}

/// Storage backend configuration, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "options")]
pub enum StorageConfig {
    #[serde(rename = "local")]
    Local(LocalStorageOptions),
    #[serde(rename = "s3")]
    RemoteObjectStore(ObjectStoreOptions),
}

impl StorageConfig {
    /// Backend kind this config selects
    pub fn kind(&self) -> StorageKind {
        match self {
            StorageConfig::Local(_) => StorageKind::Local,
            StorageConfig::RemoteObjectStore(_) => StorageKind::RemoteObjectStore,
        }
    }

    /// Root directory, if this is a local config
    pub fn local_root(&self) -> Option<&Path> {
        match self {
            StorageConfig::Local(options) => Some(&options.root_path),
            StorageConfig::RemoteObjectStore(_) => None,
        }
    }

    /// Object store options, if this is a remote config
    pub fn object_store(&self) -> Option<&ObjectStoreOptions> {
        match self {
            StorageConfig::Local(_) => None,
            StorageConfig::RemoteObjectStore(options) => Some(options),
        }
    }
}
