//! Validated font name used as the registry key.

use std::borrow::Borrow;
use std::fmt;

use crate::error::RegistryError;

/// Case-sensitive logical font name.
///
/// A name is rejected when it is empty, consists only of whitespace, or
/// contains a control character. No other normalization is applied, so
/// `"Roboto"` and `"roboto"` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontName(String);

impl FontName {
    /// Validate and wrap a font name.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() || name.chars().any(char::is_control) {
            return Err(RegistryError::InvalidName { name });
        }
        Ok(FontName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FontName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FontName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FontName {
    type Error = RegistryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        FontName::new(value)
    }
}

impl TryFrom<String> for FontName {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FontName::new(value)
    }
}
