//! Configuration system for the font registry.
//!
//! This crate provides configuration loading, saving, and default values for
//! the font registry. It includes:
//!
//! - font source settings (system fonts, extra directories, app font files)
//! - startup preload and fallback family lists
//! - the registry miss policy and log level

pub mod config;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use font_registry_core::MissPolicy;
pub use types::LogLevel;
