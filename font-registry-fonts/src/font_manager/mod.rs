//! fontdb-backed font loader.
//!
//! The database is populated once at construction from:
//! - system font folders (optional)
//! - extra font directories
//! - application font files, whose face names are remembered so they can be
//!   listed with [`FontDbLoader::app_font_names`]
//!
//! Lookups only read the database, so one loader can serve many threads.

mod fallbacks;
mod loader;
mod types;

use font_registry_config::Config;
use font_registry_core::{FontLoader, FontName, LoadError};
use fontdb::{Database, ID};

pub use fallbacks::FALLBACK_FAMILIES;
pub use loader::{load_app_font, load_font_file, parse_style};
pub use types::FontData;

/// Resolves font names against a `fontdb::Database`.
pub struct FontDbLoader {
    /// Font database for system and file font queries
    font_db: Database,

    /// Face names contained in the configured app font files, sorted
    app_font_names: Vec<String>,
}

impl FontDbLoader {
    /// Build a loader from the font sources listed in `config`.
    ///
    /// Unreadable directories or files are logged and skipped.
    pub fn new(config: &Config) -> Self {
        let mut font_db = Database::new();

        if config.load_system_fonts {
            font_db.load_system_fonts();
            log::info!("Loaded {} system fonts", font_db.len());
        }

        for dir in config.resolved_font_dirs() {
            let before = font_db.len();
            font_db.load_fonts_dir(&dir);
            log::info!(
                "Loaded {} fonts from {:?}",
                font_db.len() - before,
                dir
            );
        }

        let mut app_font_names = Vec::new();
        for path in config.resolved_app_fonts() {
            let names = loader::load_app_font(&mut font_db, &path);
            if names.is_empty() {
                log::warn!("App font {:?} could not be read", path);
                continue;
            }
            log::debug!("App font {:?} provides {:?}", path, names);
            app_font_names.extend(names);
        }
        app_font_names.sort();
        app_font_names.dedup();

        log::info!(
            "Font database ready: {} faces, {} app font names",
            font_db.len(),
            app_font_names.len()
        );

        FontDbLoader {
            font_db,
            app_font_names,
        }
    }

    /// Wrap an already populated database.
    pub fn from_database(font_db: Database) -> Self {
        FontDbLoader {
            font_db,
            app_font_names: Vec::new(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.font_db
    }

    /// Number of faces known to the database.
    pub fn face_count(&self) -> usize {
        self.font_db.len()
    }

    /// Face names provided by the configured app font files.
    pub fn app_font_names(&self) -> &[String] {
        &self.app_font_names
    }

    /// Find the face for a name using PostScript, family and `Family-Style`
    /// matching in that order.
    fn find_face(&self, name: &str) -> Option<ID> {
        if let Some(id) = loader::find_by_post_script_name(&self.font_db, name) {
            log::debug!("'{}' matched by PostScript name", name);
            return Some(id);
        }

        if let Some(id) = loader::query_family(&self.font_db, loader::family_for(name), None, None)
        {
            log::debug!("'{}' matched by family name", name);
            return Some(id);
        }

        let (family, suffix) = name.rsplit_once('-')?;
        let (weight, style) = parse_style(suffix)?;
        let id = loader::query_exact_style(&self.font_db, family, weight, style)?;
        log::debug!(
            "'{}' matched as family '{}' weight {} {:?}",
            name,
            family,
            weight.0,
            style
        );
        Some(id)
    }
}

impl FontLoader for FontDbLoader {
    type Font = FontData;

    fn load(&self, name: &FontName) -> Result<FontData, LoadError> {
        let id = self.find_face(name.as_str()).ok_or(LoadError::NotFound)?;
        loader::face_data(&self.font_db, id)
    }
}

impl std::fmt::Debug for FontDbLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDbLoader")
            .field("faces", &self.font_db.len())
            .field("app_font_names", &self.app_font_names.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_loader() -> FontDbLoader {
        FontDbLoader::new(&Config::new().with_system_fonts(false))
    }

    #[test]
    fn test_empty_database_reports_not_found() {
        let loader = empty_loader();
        assert_eq!(loader.face_count(), 0);
        let name = FontName::new("Roboto-Bold").unwrap();
        assert!(matches!(loader.load(&name), Err(LoadError::NotFound)));
    }

    #[test]
    fn test_missing_app_font_is_skipped() {
        let config = Config::new()
            .with_system_fonts(false)
            .with_app_font("/nonexistent/Brand-Regular.ttf");
        let loader = FontDbLoader::new(&config);
        assert!(loader.app_font_names().is_empty());
        assert_eq!(loader.face_count(), 0);
    }

    #[test]
    fn test_undecodable_app_font_adds_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not a font").unwrap();

        let config = Config::new()
            .with_system_fonts(false)
            .with_app_font(file.path());
        let loader = FontDbLoader::new(&config);
        assert!(loader.app_font_names().is_empty());
        assert_eq!(loader.face_count(), 0);
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", empty_loader());
        assert!(debug.contains("FontDbLoader"));
        assert!(debug.contains("faces"));
    }
}
