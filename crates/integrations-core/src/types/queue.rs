//! Resolved message queue configuration

use serde::Serialize;

use super::kind::QueueKind;

/// Options for the database-backed queue driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseQueueOptions {
    /// Postgres connection URL
    pub connection_string: String,
}

/// Options for the Redis-backed queue driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisQueueOptions {
    pub host: String,
    pub port: u16,
}

impl RedisQueueOptions {
    /// `host:port` pair as a client would dial it
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Message queue backend configuration, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options")]
pub enum QueueConfig {
    #[serde(rename = "pg-boss")]
    DatabaseBacked(DatabaseQueueOptions),
    #[serde(rename = "bull-mq")]
    RedisBacked(RedisQueueOptions),
}

impl QueueConfig {
    /// Backend kind this config selects
    pub fn kind(&self) -> QueueKind {
        match self {
            QueueConfig::DatabaseBacked(_) => QueueKind::DatabaseBacked,
            QueueConfig::RedisBacked(_) => QueueKind::RedisBacked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_address() {
        let options = RedisQueueOptions { host: "localhost".to_string(), port: 6379 };
        assert_eq!(options.address(), "localhost:6379");
        assert_eq!(QueueConfig::RedisBacked(options).kind(), QueueKind::RedisBacked);
    }

    #[test]
    fn test_serialized_shape() {
        let config = QueueConfig::DatabaseBacked(DatabaseQueueOptions {
            connection_string: "postgres://localhost/app".to_string(),
        });
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "pg-boss");
        assert_eq!(json["options"]["connectionString"], "postgres://localhost/app");
    }
}
