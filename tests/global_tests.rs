//! Tests for the process-wide registry.
//!
//! Kept in its own test binary because the global can only be set once.

use std::sync::Arc;

use font_registry::global;
use font_registry::{Config, FontName, MissPolicy, load_font_file};
use font_registry_fonts::fontdb;

#[test]
fn test_global_registry_initializes_once() {
    assert!(global::get().is_none());

    let first = global::init(
        &Config::new()
            .with_system_fonts(false)
            .with_miss_policy(MissPolicy::Race),
    );
    // A later config is ignored.
    let second = global::init(&Config::new().with_system_fonts(false));

    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, global::get().unwrap()));
    assert_eq!(first.policy(), MissPolicy::Race);
    assert!(first.resolve("DoesNotExist").is_err());
    assert!(!first.contains("DoesNotExist"));

    // Registrations are visible through every reference to the global.
    if let Some(font) = first_system_font_file().and_then(|p| load_font_file(&p).ok()) {
        let font = Arc::new(font);
        first.register(FontName::new("AppBrand").unwrap(), Arc::clone(&font));
        assert!(Arc::ptr_eq(&global::get().unwrap().resolve("AppBrand").unwrap(), &font));
    }
}

#[test]
fn test_fallback_families_default_and_configured() {
    let defaults = global::fallback_families(&Config::new());
    assert_eq!(defaults.last().map(String::as_str), Some("sans-serif"));

    let mut config = Config::new();
    config.fallback_families = vec!["Menlo".to_string()];
    assert_eq!(global::fallback_families(&config), vec!["Menlo"]);
}

fn first_system_font_file() -> Option<std::path::PathBuf> {
    let registry = global::build_registry(&Config::default());
    registry
        .loader()
        .database()
        .faces()
        .find_map(|face| match &face.source {
            fontdb::Source::File(path) if face.index == 0 => Some(path.clone()),
            _ => None,
        })
}
