//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Forwards every message as a `tracing` event with target `integrations`
///
/// Use this once the host has installed a subscriber; the resolvers'
/// output then lands wherever the rest of the process logs go.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "integrations", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "integrations", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "integrations", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "integrations", "{}", message);
    }
}
