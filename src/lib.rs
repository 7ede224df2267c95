//! font-registry: a process-wide font name registry and resolution cache.
//!
//! The workspace is split into:
//! - `font-registry-core`: the registry, the `FontLoader` trait and errors
//! - `font-registry-fonts`: the fontdb-backed loader and `FontData`
//! - `font-registry-config`: YAML configuration
//!
//! This crate ties them together with a process-wide registry, a log bridge
//! and the `font-registry` command-line tool.

pub mod cli;
pub mod debug;
pub mod global;

pub use font_registry_config::{Config, ConfigError, LogLevel, MissPolicy};
pub use font_registry_core::{
    FnLoader, FontHandle, FontLoader, FontName, FontRegistry, LoadError, RegistryError,
    RegistryStats,
};
pub use font_registry_fonts::{FALLBACK_FAMILIES, FontData, FontDbLoader, load_font_file};
pub use global::SystemRegistry;
