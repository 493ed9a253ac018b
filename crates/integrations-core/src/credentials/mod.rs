//! Credential discovery for the remote object store
//!
//! This module provides the injectable discovery capability:
//! - `CredentialProvider` trait for implementing custom providers
//! - Built-in providers: `EnvCredentialProvider`, `ProfileCredentialProvider`,
//!   `StaticCredentialProvider`, `ChainCredentialProvider`
//! - `LazyCredentials`, the deferred reference stored in resolved configs

mod traits;
mod env_provider;
mod profile_provider;
mod static_provider;
mod chain;
mod lazy;

pub use traits::{
    CredentialContext, CredentialError, CredentialProvider, CredentialResult, Credentials,
};
pub use env_provider::EnvCredentialProvider;
pub use profile_provider::ProfileCredentialProvider;
pub use static_provider::StaticCredentialProvider;
pub use chain::{ChainCredentialProvider, default_credential_chain};
pub use lazy::LazyCredentials;
