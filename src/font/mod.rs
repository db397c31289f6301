//! # Font Management
//!
//! The menu uses two faces: a regular one for descriptions and a bold one
//! for names, prices and the footer. Each face is resolved from an explicit
//! file, from the system font database, or not at all.
//!
//! Measurement never depends on a face being present. Without one, widths
//! come from the built-in Helvetica tables in [`metrics`], so the layout
//! stays identical on a machine with no fonts; only glyph drawing is lost.

pub mod glyph;
pub mod metrics;

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::config::FontConfig;
use crate::error::MenuError;
use crate::style::FontWeight;
pub use metrics::StandardFontMetrics;

/// Families tried, in order, when discovering system fonts.
const SYSTEM_FAMILIES: &[&str] = &["Arial", "Liberation Sans", "Helvetica", "DejaVu Sans"];

/// A TrueType/OpenType face held in memory with its advance widths.
#[derive(Debug, Clone)]
pub struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advance_widths: HashMap<char, u16>,
    default_advance: u16,
}

impl LoadedFace {
    /// Parse `data` and sample its advance widths.
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self, MenuError> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| MenuError::Font(format!("Failed to parse font: {}", e)))?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(Self {
            data,
            index,
            units_per_em,
            advance_widths,
            default_advance,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, MenuError> {
        let data = std::fs::read(path).map_err(|e| {
            MenuError::Font(format!("Failed to read font file '{}': {}", path.display(), e))
        })?;
        Self::from_data(data, 0)
    }

    /// Re-parse the face for outline access. Parsing is lazy in ttf-parser,
    /// so this is cheap enough to do once per text run.
    pub fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }
}

/// Shared font context used by layout (measurement) and rasterization
/// (glyph outlines).
#[derive(Debug, Clone, Default)]
pub struct FontContext {
    regular: Option<LoadedFace>,
    bold: Option<LoadedFace>,
}

impl FontContext {
    /// Built-in metrics only. Text is measured but not drawn.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Use the given faces for regular and bold text.
    pub fn with_faces(regular: LoadedFace, bold: LoadedFace) -> Self {
        Self {
            regular: Some(regular),
            bold: Some(bold),
        }
    }

    /// Discover faces among the installed system fonts.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self {
            regular: query_system_face(&db, fontdb::Weight::NORMAL),
            bold: query_system_face(&db, fontdb::Weight::BOLD),
        }
    }

    /// Resolve faces as configured: explicit paths win, then (if enabled)
    /// system discovery. An explicit path that fails to load is an error;
    /// a missing system font is not.
    pub fn from_config(config: &FontConfig) -> Result<Self, MenuError> {
        let mut context = if config.system {
            Self::system()
        } else {
            Self::builtin()
        };
        if let Some(path) = &config.regular {
            context.regular = Some(LoadedFace::from_path(path)?);
        }
        if let Some(path) = &config.bold {
            context.bold = Some(LoadedFace::from_path(path)?);
        }
        if !context.can_draw() {
            warn!("No usable font face found; text will be measured but not drawn");
        }
        Ok(context)
    }

    pub fn face(&self, weight: FontWeight) -> Option<&LoadedFace> {
        match weight {
            FontWeight::Regular => self.regular.as_ref(),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    /// Whether any text can actually be drawn.
    pub fn can_draw(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }

    pub fn char_width(&self, ch: char, weight: FontWeight, font_size: f64) -> f64 {
        match self.face(weight) {
            Some(face) => face.char_width(ch, font_size),
            None => standard_metrics(weight).char_width(ch, font_size),
        }
    }

    /// Measure the width of a string in pixels.
    pub fn measure_string(&self, text: &str, weight: FontWeight, font_size: f64) -> f64 {
        match self.face(weight) {
            Some(face) => text.chars().map(|ch| face.char_width(ch, font_size)).sum(),
            None => standard_metrics(weight).measure_string(text, font_size),
        }
    }
}

fn standard_metrics(weight: FontWeight) -> StandardFontMetrics {
    match weight {
        FontWeight::Regular => metrics::HELVETICA,
        FontWeight::Bold => metrics::HELVETICA_BOLD,
    }
}

fn query_system_face(db: &fontdb::Database, weight: fontdb::Weight) -> Option<LoadedFace> {
    let mut families: Vec<fontdb::Family<'_>> = SYSTEM_FAMILIES
        .iter()
        .copied()
        .map(fontdb::Family::Name)
        .collect();
    families.push(fontdb::Family::SansSerif);

    let query = fontdb::Query {
        families: &families,
        weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    match LoadedFace::from_data(data, index) {
        Ok(face) => {
            if let Some(info) = db.face(id) {
                debug!("Using system font {:?} (weight {})", info.post_script_name, weight.0);
            }
            Some(face)
        }
        Err(e) => {
            warn!("Skipping system font: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_measures_without_faces() {
        let ctx = FontContext::builtin();
        assert!(!ctx.can_draw());
        let w = ctx.char_width(' ', FontWeight::Regular, 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_builtin_bold_wider() {
        let ctx = FontContext::builtin();
        let regular = ctx.measure_string("Feijoada", FontWeight::Regular, 16.0);
        let bold = ctx.measure_string("Feijoada", FontWeight::Bold, 16.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_measure_scales_with_size() {
        let ctx = FontContext::builtin();
        let small = ctx.measure_string("Pizza", FontWeight::Regular, 16.0);
        let large = ctx.measure_string("Pizza", FontWeight::Regular, 32.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_font_data_is_error() {
        let err = LoadedFace::from_data(vec![0, 1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, MenuError::Font(_)));
    }

    #[test]
    fn test_missing_font_path_is_error() {
        let config = FontConfig {
            regular: Some("/nonexistent/font.ttf".into()),
            bold: None,
            system: false,
        };
        assert!(FontContext::from_config(&config).is_err());
    }

    #[test]
    fn test_config_without_system_is_builtin() {
        let config = FontConfig {
            regular: None,
            bold: None,
            system: false,
        };
        let ctx = FontContext::from_config(&config).unwrap();
        assert!(!ctx.can_draw());
    }
}
