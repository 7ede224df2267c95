//! Font registry configuration file.
//!
//! Stored as YAML at `~/.config/font-registry/config.yaml` (XDG convention on
//! all platforms except Windows, which uses `%APPDATA%\font-registry`).
//! Every field has a default, so a partial or missing file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use font_registry_core::{FontName, MissPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::LogLevel;

const APP_DIR: &str = "font-registry";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Populate the font database from the platform's system font folders
    pub load_system_fonts: bool,

    /// Extra directories scanned recursively for font files
    pub font_dirs: Vec<PathBuf>,

    /// Font files shipped with the application; their face names are
    /// reported by `app_font_names`
    pub app_fonts: Vec<PathBuf>,

    /// Names resolved eagerly at startup
    pub preload: Vec<String>,

    /// Families tried in order when a requested font is unavailable.
    /// Empty means the built-in fallback list.
    pub fallback_families: Vec<String>,

    /// Handling of concurrent misses for the same name
    pub miss_policy: MissPolicy,

    /// Log verbosity
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            app_fonts: Vec::new(),
            preload: Vec::new(),
            fallback_families: Vec::new(),
            miss_policy: MissPolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path, or defaults if it is missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml_ng::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }

    /// Check that every configured font name is usable as a registry key
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, names) in [
            ("preload", &self.preload),
            ("fallback_families", &self.fallback_families),
        ] {
            for name in names {
                FontName::new(name.as_str()).map_err(|_| {
                    ConfigError::Validation(format!("{field}: invalid font name {name:?}"))
                })?;
            }
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Get the configuration directory
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join(APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join(APP_DIR)
            } else {
                // Fallback if home directory cannot be determined
                PathBuf::from(".")
            }
        }
    }

    /// `font_dirs` with `~` expanded
    pub fn resolved_font_dirs(&self) -> Vec<PathBuf> {
        self.font_dirs.iter().map(|p| expand_home(p)).collect()
    }

    /// `app_fonts` with `~` expanded
    pub fn resolved_app_fonts(&self) -> Vec<PathBuf> {
        self.app_fonts.iter().map(|p| expand_home(p)).collect()
    }

    pub fn with_system_fonts(mut self, enabled: bool) -> Self {
        self.load_system_fonts = enabled;
        self
    }

    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    pub fn with_app_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.app_fonts.push(path.into());
        self
    }

    pub fn with_preload(mut self, name: impl Into<String>) -> Self {
        self.preload.push(name.into());
        self
    }

    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/usr/share/fonts");
        assert_eq!(expand_home(plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/fonts")), home.join("fonts"));
            assert_eq!(expand_home(Path::new("~")), home);
        }
    }

    #[test]
    fn test_config_path_file_name() {
        let path = Config::config_path();
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE);
        assert!(path.parent().unwrap().ends_with(APP_DIR));
    }

    #[test]
    fn test_validate_rejects_blank_preload() {
        let config = Config::new().with_preload("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
