//! Read-only environment settings
//!
//! Resolvers never touch configuration sources directly; they read through
//! the `Environment` trait:
//! - `ProcessEnvironment`: live process environment variables
//! - `MemoryEnvironment`: in-memory map, used for tests and startup snapshots
//! - `FileEnvironment`: `.env` or YAML settings file
//! - `ChainEnvironment`: ordered fallback over other sources

mod traits;
mod process;
mod memory;
mod file;
mod chain;

pub use traits::{Environment, EnvironmentExt};
pub use process::ProcessEnvironment;
pub use memory::MemoryEnvironment;
pub use file::{FileEnvironment, FileFormat};
pub use chain::ChainEnvironment;
