//! Data models for the application
//!
//! This module contains all data structures used throughout the client,
//! organized by domain. Each sub-module represents a specific feature area.

mod credits;
mod enhancement;
mod gallery;
mod plan;
mod upload;
mod user;

// Re-export all models for convenient imports
pub use credits::*;
pub use enhancement::*;
pub use gallery::*;
pub use plan::*;
pub use upload::*;
pub use user::*;
