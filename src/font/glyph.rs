//! Glyph outlines as tiny-skia paths.
//!
//! Outlines come out of ttf-parser in font design units with y pointing up.
//! [`glyph_transform`] maps them onto the canvas: scale to pixels, flip y,
//! and move the origin to the pen position on the baseline.

use tiny_skia::{Path, PathBuilder, Transform};

/// Receives ttf-parser outline commands and records them into a path.
pub struct GlyphPathBuilder {
    builder: PathBuilder,
}

impl GlyphPathBuilder {
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    /// `None` when the glyph has no contours (a space, for instance).
    pub fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl Default for GlyphPathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ttf_parser::OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Outline of `glyph` in design units.
pub fn glyph_path(face: &ttf_parser::Face<'_>, glyph: ttf_parser::GlyphId) -> Option<Path> {
    let mut builder = GlyphPathBuilder::new();
    face.outline_glyph(glyph, &mut builder)?;
    builder.finish()
}

/// Design units → device pixels, with the glyph origin at (`x`, `baseline`).
#[inline]
pub fn glyph_transform(scale: f32, x: f32, baseline: f32) -> Transform {
    Transform::from_row(scale, 0.0, 0.0, -scale, x, baseline)
}
