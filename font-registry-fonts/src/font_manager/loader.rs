//! Font loading utilities for database and file fonts.

use std::path::Path;

use font_registry_core::LoadError;
use fontdb::{Database, Family, ID, Query, Source};

use super::types::FontData;

/// Load face 0 of a font file from disk.
///
/// Used for fonts installed at runtime; the caller registers the result
/// under the name it wants.
///
/// # Errors
/// - `LoadError::Io` if the file cannot be read
/// - `LoadError::InvalidData` if the bytes are not a font
pub fn load_font_file(path: &Path) -> Result<FontData, LoadError> {
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontData::new(data).ok_or_else(|| {
        LoadError::InvalidData(format!("{} is not a TrueType/OpenType font", path.display()))
    })
}

/// Add every face of an app font file to `db` and return their names.
///
/// Faces without a PostScript name contribute their first family name.
/// An unreadable or undecodable file adds nothing and yields no names.
pub fn load_app_font(db: &mut Database, path: &Path) -> Vec<String> {
    let ids = db.load_font_source(Source::File(path.to_path_buf()));
    ids.iter()
        .filter_map(|&id| db.face(id))
        .filter_map(|face| {
            if !face.post_script_name.is_empty() {
                Some(face.post_script_name.clone())
            } else {
                face.families.first().map(|(family, _)| family.clone())
            }
        })
        .collect()
}

/// Find a face whose PostScript name equals `name` exactly.
pub fn find_by_post_script_name(db: &Database, name: &str) -> Option<ID> {
    db.faces()
        .find(|face| face.post_script_name == name)
        .map(|face| face.id)
}

/// Map a family string to a fontdb family, recognizing the CSS generic names.
pub fn family_for(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

/// Query the database for a family with specific style.
pub fn query_family(
    db: &Database,
    family: Family<'_>,
    weight: Option<fontdb::Weight>,
    style: Option<fontdb::Style>,
) -> Option<ID> {
    let query = Query {
        families: &[family],
        weight: weight.unwrap_or(fontdb::Weight::NORMAL),
        style: style.unwrap_or(fontdb::Style::Normal),
        ..Query::default()
    };
    db.query(&query)
}

/// Query for `family` and accept the match only if weight and style are exact.
pub fn query_exact_style(
    db: &Database,
    family: &str,
    weight: fontdb::Weight,
    style: fontdb::Style,
) -> Option<ID> {
    let id = query_family(db, Family::Name(family), Some(weight), Some(style))?;
    let face = db.face(id)?;
    (face.weight == weight && face.style == style).then_some(id)
}

/// Parse a style suffix such as `Bold`, `LightItalic` or `Regular`.
pub fn parse_style(suffix: &str) -> Option<(fontdb::Weight, fontdb::Style)> {
    if suffix.is_empty() {
        return None;
    }
    let (weight_part, style) = match suffix.strip_suffix("Italic") {
        Some(rest) => (rest, fontdb::Style::Italic),
        None => match suffix.strip_suffix("Oblique") {
            Some(rest) => (rest, fontdb::Style::Oblique),
            None => (suffix, fontdb::Style::Normal),
        },
    };

    let weight = match weight_part {
        "" | "Regular" | "Normal" | "Book" | "Roman" => fontdb::Weight::NORMAL,
        "Thin" | "Hairline" => fontdb::Weight::THIN,
        "ExtraLight" | "UltraLight" => fontdb::Weight::EXTRA_LIGHT,
        "Light" => fontdb::Weight::LIGHT,
        "Medium" => fontdb::Weight::MEDIUM,
        "SemiBold" | "DemiBold" => fontdb::Weight::SEMIBOLD,
        "Bold" => fontdb::Weight::BOLD,
        "ExtraBold" | "UltraBold" | "Heavy" => fontdb::Weight::EXTRA_BOLD,
        "Black" => fontdb::Weight::BLACK,
        _ => return None,
    };
    Some((weight, style))
}

/// Copy a face out of the database and validate it.
pub fn face_data(db: &Database, id: ID) -> Result<FontData, LoadError> {
    // Pass face_index for TrueType Collection files where several faces
    // share the same data.
    db.with_face_data(id, |data, face_index| {
        FontData::new_with_index(data.to_vec(), face_index as usize)
    })
    .ok_or_else(|| LoadError::Platform("font source is no longer readable".to_string()))?
    .ok_or_else(|| LoadError::InvalidData("face rejected by font parser".to_string()))
}
