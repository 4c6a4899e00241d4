//! Vault-side building blocks: configuration, errors, file discovery, chunking

pub mod chunk;
pub mod config;
pub mod error;
pub mod paths;
pub mod walker;
