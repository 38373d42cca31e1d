//! # settings-codegen-cli
//!
//! CLI library for generating the C++ runtime settings subsystem from a
//! declarative settings schema.
//!
//! This crate provides the functionality behind the `settings-codegen` CLI
//! tool: configuration loading, schema deserialization, artifact generation,
//! and file output.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`loader`] - Settings schema loading and deserialization
//! - [`writer`] - File output and dry-run support
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod loader;
pub mod writer;

// Re-export main types for convenience
pub use config::{CliArgs, Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use loader::SchemaLoader;
pub use writer::{FileWriter, WriteResult};
