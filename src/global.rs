//! Process-wide font registry.
//!
//! The registry is created once, on the first call to [`init`], and lives for
//! the rest of the process. Later calls return the same instance regardless
//! of the config they pass.

use std::sync::OnceLock;

use font_registry_config::Config;
use font_registry_core::FontRegistry;
use font_registry_fonts::{FALLBACK_FAMILIES, FontDbLoader};

/// Registry over the fontdb-backed loader.
pub type SystemRegistry = FontRegistry<FontDbLoader>;

static GLOBAL: OnceLock<SystemRegistry> = OnceLock::new();

/// Build a standalone registry from `config` and preload its fonts.
///
/// Preload failures are logged, not returned.
pub fn build_registry(config: &Config) -> SystemRegistry {
    let registry = FontRegistry::with_policy(FontDbLoader::new(config), config.miss_policy);
    let report = registry.preload(&config.preload);
    for err in &report.failed {
        log::warn!("Preload failed: {}", err);
    }
    registry
}

/// Initialize the process-wide registry, or return it if already set.
pub fn init(config: &Config) -> &'static SystemRegistry {
    GLOBAL.get_or_init(|| build_registry(config))
}

/// The process-wide registry, if [`init`] has run.
pub fn get() -> Option<&'static SystemRegistry> {
    GLOBAL.get()
}

/// Fallback families from `config`, or the built-in list when none are set.
pub fn fallback_families(config: &Config) -> Vec<String> {
    if config.fallback_families.is_empty() {
        FALLBACK_FAMILIES.iter().map(|s| s.to_string()).collect()
    } else {
        config.fallback_families.clone()
    }
}
