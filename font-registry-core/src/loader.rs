//! The font construction capability injected into the registry.

use std::sync::Arc;

use crate::error::LoadError;
use crate::name::FontName;

/// Constructs a font for a logical name.
///
/// Implementations may block (platform I/O, file reads). The registry calls
/// `load` without holding its table lock and applies no retry policy of its
/// own.
pub trait FontLoader: Send + Sync {
    /// The loaded font type stored by the registry.
    type Font: Send + Sync;

    /// Produce a ready-to-use font for `name`.
    ///
    /// Return [`LoadError::NotFound`] when nothing matches; any other
    /// variant is reported to callers as a load failure.
    fn load(&self, name: &FontName) -> Result<Self::Font, LoadError>;
}

impl<L: FontLoader + ?Sized> FontLoader for Arc<L> {
    type Font = L::Font;

    fn load(&self, name: &FontName) -> Result<Self::Font, LoadError> {
        (**self).load(name)
    }
}

impl<L: FontLoader + ?Sized> FontLoader for Box<L> {
    type Font = L::Font;

    fn load(&self, name: &FontName) -> Result<Self::Font, LoadError> {
        (**self).load(name)
    }
}

impl<L: FontLoader + ?Sized> FontLoader for &L {
    type Font = L::Font;

    fn load(&self, name: &FontName) -> Result<Self::Font, LoadError> {
        (**self).load(name)
    }
}

/// Adapts a closure into a [`FontLoader`].
pub struct FnLoader<F>(pub F);

impl<F, T> FontLoader for FnLoader<F>
where
    F: Fn(&FontName) -> Result<T, LoadError> + Send + Sync,
    T: Send + Sync,
{
    type Font = T;

    fn load(&self, name: &FontName) -> Result<T, LoadError> {
        (self.0)(name)
    }
}
