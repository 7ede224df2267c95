//! Typed error types for font-registry-core.
//!
//! Callers at the crate boundary can match on specific variants instead of
//! relying on opaque `anyhow` strings. A failed resolution means the font is
//! unavailable for rendering; callers are expected to fall back to another
//! font rather than abort.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`FontRegistry`](crate::FontRegistry) operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The name is empty or malformed. Raised before any lookup.
    #[error("invalid font name {name:?}")]
    InvalidName {
        /// The rejected name, verbatim.
        name: String,
    },

    /// The loader could not find a font for the name.
    #[error("font not found: '{name}'")]
    FontNotFound {
        /// The requested name.
        name: String,
    },

    /// The loader matched the name but could not construct the font.
    #[error("failed to load font '{name}': {source}")]
    LoadFailure {
        /// The requested name.
        name: String,
        /// Error reported by the loader, unchanged.
        #[source]
        source: LoadError,
    },
}

impl RegistryError {
    /// The font name this error refers to.
    pub fn name(&self) -> &str {
        match self {
            RegistryError::InvalidName { name }
            | RegistryError::FontNotFound { name }
            | RegistryError::LoadFailure { name, .. } => name,
        }
    }

    /// Whether a fallback font should be tried.
    ///
    /// Invalid names are programmer errors and are not retried with fallbacks.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RegistryError::FontNotFound { .. } | RegistryError::LoadFailure { .. }
        )
    }

    pub(crate) fn from_load(name: &str, err: LoadError) -> Self {
        match err {
            LoadError::NotFound => RegistryError::FontNotFound {
                name: name.to_string(),
            },
            other => RegistryError::LoadFailure {
                name: name.to_string(),
                source: other,
            },
        }
    }
}

/// Errors reported by a [`FontLoader`](crate::FontLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    /// No font matches the name on any known search path.
    #[error("no matching font")]
    NotFound,

    /// A match was found but its data could not be decoded as a font.
    #[error("invalid font data: {0}")]
    InvalidData(String),

    /// The font file could not be read.
    #[error("font file read failed for '{}': {source}", .path.display())]
    Io {
        /// Path to the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The platform font service rejected the font.
    #[error("platform font error: {0}")]
    Platform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_font_not_found() {
        let err = RegistryError::from_load("Missing", LoadError::NotFound);
        assert!(matches!(err, RegistryError::FontNotFound { ref name } if name == "Missing"));
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_other_errors_map_to_load_failure() {
        let err = RegistryError::from_load("Broken", LoadError::InvalidData("bad cmap".into()));
        match &err {
            RegistryError::LoadFailure { name, source } => {
                assert_eq!(name, "Broken");
                assert!(matches!(source, LoadError::InvalidData(msg) if msg == "bad cmap"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_includes_name() {
        let err = RegistryError::FontNotFound {
            name: "DoesNotExist".into(),
        };
        assert_eq!(err.to_string(), "font not found: 'DoesNotExist'");
        assert_eq!(err.name(), "DoesNotExist");
    }

    #[test]
    fn test_invalid_name_is_not_unavailable() {
        let err = RegistryError::InvalidName {
            name: String::new(),
        };
        assert!(!err.is_unavailable());
    }
}
