//! Configuration module for dti-query
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DtiPaths;
pub use settings::Settings;
