//! Logger trait definition

use std::sync::Arc;

/// Diagnostic sink for resolver activity
///
/// Resolution runs before the application's real logging backend exists
/// (the logger backend is one of the things being resolved), so resolvers
/// report through this small seam instead of a global.
///
/// Implementations:
/// - `NoOpLogger`: Silent, the default
/// - `ConsoleLogger`: Prefixed lines on stdout/stderr
/// - `TracingLogger`: Forwards to `tracing` events
/// - `MemoryLogger`: Records lines for assertions
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Convenience macros for logging
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}
