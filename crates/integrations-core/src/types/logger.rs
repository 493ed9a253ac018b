//! Resolved logger driver configuration

use serde::Serialize;

use super::kind::LoggerKind;

/// Options for the remote error tracker driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorTrackerOptions {
    /// Ingestion DSN, empty when not configured
    pub dsn: String,
}

/// Logger backend configuration, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options")]
pub enum LoggerConfig {
    #[serde(rename = "console")]
    Console,
    #[serde(rename = "sentry")]
    RemoteErrorTracker(ErrorTrackerOptions),
}

impl LoggerConfig {
    /// Backend kind this config selects
    pub fn kind(&self) -> LoggerKind {
        match self {
            LoggerConfig::Console => LoggerKind::Console,
            LoggerConfig::RemoteErrorTracker(_) => LoggerKind::RemoteErrorTracker,
        }
    }
}
