//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod letter;
pub mod read;
pub mod store;
