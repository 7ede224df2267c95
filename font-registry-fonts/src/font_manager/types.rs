//! The loaded font type stored in the registry.

use std::sync::Arc;

use swash::{FontRef, StringId};

/// Owned font bytes plus a validated face reference.
///
/// The `FontRef` borrows from `data`, which is kept alive by the `Arc` for as
/// long as this struct exists. Immutable after construction.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within `data` (non-zero only for collections)
    pub face_index: usize,
    /// Family name from the `name` table, empty if absent
    pub family: String,
    /// PostScript name from the `name` table, empty if absent
    pub post_script_name: String,
    /// Swash font reference for glyph operations
    pub font_ref: FontRef<'static>,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("family", &self.family)
            .field("post_script_name", &self.post_script_name)
            .field("face_index", &self.face_index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// # Returns
    /// `Some(FontData)` if the font data is valid, `None` otherwise.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(data: Vec<u8>, face_index: usize) -> Option<Self> {
        let data_arc = Arc::new(data);

        // SAFETY: the bytes live on the heap behind `data_arc`, which is stored
        // in the same struct as the FontRef and never mutated, so the slice
        // outlives every use of the FontRef.
        let font_ref = unsafe {
            let bytes = data_arc.as_slice();
            let static_bytes: &'static [u8] = std::mem::transmute(bytes);
            FontRef::from_index(static_bytes, face_index)?
        };

        let family = read_name(&font_ref, StringId::Family);
        let post_script_name = read_name(&font_ref, StringId::PostScript);

        Some(FontData {
            data: data_arc,
            face_index,
            family,
            post_script_name,
            font_ref,
        })
    }

    /// Number of glyphs in the face.
    pub fn glyph_count(&self) -> u16 {
        self.font_ref.metrics(&[]).glyph_count
    }

    /// Weight class from the `OS/2` table (400 = regular, 700 = bold).
    pub fn weight(&self) -> u16 {
        self.font_ref.attributes().weight().0
    }

    /// Name used for display: PostScript name, else family, else `"<unnamed>"`.
    pub fn display_name(&self) -> &str {
        if !self.post_script_name.is_empty() {
            &self.post_script_name
        } else if !self.family.is_empty() {
            &self.family
        } else {
            "<unnamed>"
        }
    }
}

fn read_name(font_ref: &FontRef<'_>, id: StringId) -> String {
    font_ref
        .localized_strings()
        .find_by_id(id, None)
        .map(|s| s.chars().collect())
        .unwrap_or_default()
}
