//! # Rasterizer
//!
//! Paints a [`MenuLayout`] onto a pixmap. Order matters and is fixed:
//! background (image or gradient), then each row's panel, name,
//! description and price, then the footer. The rasterizer makes no layout
//! decisions of its own beyond horizontal text alignment, which needs the
//! run's measured width.

use log::warn;
use tiny_skia::{
    FillRule, FilterQuality, GradientStop, LinearGradient, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Point, Rect, SpreadMode, Transform,
};

use crate::error::MenuError;
use crate::font::glyph::{glyph_path, glyph_transform};
use crate::font::FontContext;
use crate::layout::{MenuLayout, Panel, PlacedText};
use crate::output::CompositedImage;
use crate::style::{Color, TextAlign};

/// Cubic Bézier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// How to fill the canvas before anything else is drawn.
#[derive(Debug, Clone)]
pub enum Background {
    /// A decoded image. Stretched to the canvas if the sizes differ.
    Image(Pixmap),
    /// Vertical gradient, top color to bottom color.
    Gradient { top: Color, bottom: Color },
}

/// Paints layouts using the given fonts.
pub struct Rasterizer<'a> {
    font_context: &'a FontContext,
}

impl<'a> Rasterizer<'a> {
    pub fn new(font_context: &'a FontContext) -> Self {
        Self { font_context }
    }

    pub fn paint(
        &self,
        layout: &MenuLayout,
        background: Background,
    ) -> Result<CompositedImage, MenuError> {
        let mut pixmap = self.paint_background(layout.width, layout.height, background)?;

        if !self.font_context.can_draw() {
            warn!("No font faces loaded; rendering panels without text");
        }

        for row in &layout.rows {
            fill_panel(&mut pixmap, &row.panel);
            self.draw_text(&mut pixmap, &row.name);
            for line in &row.description {
                self.draw_text(&mut pixmap, line);
            }
            self.draw_text(&mut pixmap, &row.price);
        }

        for cell in &layout.footer {
            self.draw_text(&mut pixmap, &cell.label);
            self.draw_text(&mut pixmap, &cell.value);
        }

        Ok(CompositedImage::new(pixmap))
    }

    fn paint_background(
        &self,
        width: u32,
        height: u32,
        background: Background,
    ) -> Result<Pixmap, MenuError> {
        match background {
            Background::Image(pixmap) if pixmap.width() == width && pixmap.height() == height => {
                Ok(pixmap)
            }
            Background::Image(image) => {
                let mut pixmap = empty_pixmap(width, height)?;
                let sx = width as f32 / image.width() as f32;
                let sy = height as f32 / image.height() as f32;
                let paint = PixmapPaint {
                    quality: FilterQuality::Bilinear,
                    ..PixmapPaint::default()
                };
                pixmap.draw_pixmap(
                    0,
                    0,
                    image.as_ref(),
                    &paint,
                    Transform::from_scale(sx, sy),
                    None,
                );
                Ok(pixmap)
            }
            Background::Gradient { top, bottom } => gradient_pixmap(width, height, top, bottom),
        }
    }

    /// Draw one run of text. Silently does nothing without a face.
    fn draw_text(&self, pixmap: &mut Pixmap, placed: &PlacedText) {
        let Some(loaded) = self.font_context.face(placed.style.weight) else {
            return;
        };
        let Some(face) = loaded.face() else {
            return;
        };

        let size = placed.style.font_size;
        let width = self
            .font_context
            .measure_string(&placed.text, placed.style.weight, size);
        let mut pen_x = match placed.style.align {
            TextAlign::Left => placed.x,
            TextAlign::Right => placed.x - width,
            TextAlign::Center => placed.x - width / 2.0,
        };

        let scale = (size / loaded.units_per_em() as f64) as f32;
        let paint = solid_paint(placed.style.color);

        for ch in placed.text.chars() {
            if let Some(glyph) = face.glyph_index(ch) {
                if let Some(path) = glyph_path(&face, glyph) {
                    let transform = glyph_transform(scale, pen_x as f32, placed.baseline as f32);
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
            }
            pen_x += loaded.char_width(ch, size);
        }
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn empty_pixmap(width: u32, height: u32) -> Result<Pixmap, MenuError> {
    Pixmap::new(width, height).ok_or_else(|| {
        MenuError::InvalidInput(format!("canvas size {}x{} is empty", width, height))
    })
}

fn gradient_pixmap(width: u32, height: u32, top: Color, bottom: Color) -> Result<Pixmap, MenuError> {
    let mut pixmap = empty_pixmap(width, height)?;

    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, height as f32),
        vec![
            GradientStop::new(0.0, top.to_skia()),
            GradientStop::new(1.0, bottom.to_skia()),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    );
    let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32);

    match (shader, rect) {
        (Some(shader), Some(rect)) => {
            let paint = Paint {
                shader,
                anti_alias: false,
                ..Paint::default()
            };
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        // A zero-height gradient degenerates; a flat fill is the same picture.
        _ => pixmap.fill(top.to_skia()),
    }
    Ok(pixmap)
}

fn fill_panel(pixmap: &mut Pixmap, panel: &Panel) {
    if let Some(path) = rounded_rect_path(panel) {
        pixmap.fill_path(
            &path,
            &solid_paint(panel.color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// A rounded rectangle with uniform corners. The radius is clamped to half
/// the shorter side.
pub fn rounded_rect_path(panel: &Panel) -> Option<Path> {
    let x = panel.x as f32;
    let y = panel.y as f32;
    let w = panel.width as f32;
    let h = panel.height as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = (panel.radius as f32).min(w / 2.0).min(h / 2.0).max(0.0);
    if r == 0.0 {
        return Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}
