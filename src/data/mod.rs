//! Data ingestion layer.

pub mod file;
pub mod loader;
pub mod remote;
pub mod types;
