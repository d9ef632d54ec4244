//! PixeLift Core Library
//!
//! This crate provides core domain models, error types, configuration, and
//! validation that are shared across all PixeLift client components.

pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::AppError;
pub use kv::{FileStore, KeyValueStore, MemoryStore, KEY_DARK_MODE, KEY_LAST_REFILL};
