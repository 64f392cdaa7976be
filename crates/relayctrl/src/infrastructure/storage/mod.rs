//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module implements the application's `ConfigStore` port
//! on top of a JSON file, returning defaults when the file does not exist
//! yet (first run).

pub mod config;
