//! Font name registry and resolution cache.
//!
//! This crate provides:
//! - [`FontRegistry`], a concurrency-safe table mapping a [`FontName`] to a
//!   shared font handle
//! - the [`FontLoader`] trait through which unknown names are resolved
//! - typed errors for name validation, lookup and load failures
//!
//! # Architecture
//!
//! The registry never constructs fonts itself. On a cache miss it asks the
//! injected loader, stores the result behind an `Arc`, and hands out clones
//! of that `Arc` from then on. `register` overrides an entry without
//! touching the loader.
//!
//! Concurrent misses for the same name are governed by [`MissPolicy`].

pub mod error;
pub mod loader;
pub mod name;
pub mod registry;

// Re-export main types for convenience
pub use error::{LoadError, RegistryError};
pub use loader::{FnLoader, FontLoader};
pub use name::FontName;
pub use registry::{FontHandle, FontRegistry, MissPolicy, PreloadReport, RegistryStats};
