//! Font loading for the font registry.
//!
//! This crate provides:
//! - [`FontData`], the shared font object stored by the registry
//! - [`FontDbLoader`], a `FontLoader` backed by a `fontdb` database populated
//!   from system fonts, extra directories and application font files
//! - [`load_font_file`] for fonts installed at runtime
//! - [`FALLBACK_FAMILIES`] for callers that need a default font
//!
//! # Name matching
//!
//! A requested name is matched against, in order:
//! 1. PostScript names (`Roboto-Bold`)
//! 2. Family names and the generic families `serif`, `sans-serif`,
//!    `monospace`, `cursive` and `fantasy`
//! 3. `Family-Style` pairs, with the style mapped to weight and italic

pub mod font_manager;

pub use fontdb;

// Re-export main types for convenience
pub use font_manager::{FALLBACK_FAMILIES, FontData, FontDbLoader, load_font_file};
