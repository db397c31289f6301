//! # Composited Output
//!
//! The finished menu image and the ways it leaves the process: raw pixels,
//! encoded PNG/JPEG bytes, or a file named after the menu's date.

use std::path::Path;

use chrono::{Local, NaiveDate};
use image::{ColorType, ImageEncoder, RgbaImage};
use tiny_skia::Pixmap;

use crate::error::MenuError;

/// Default JPEG quality for [`CompositedImage::save`].
pub const JPEG_QUALITY: u8 = 90;

/// A rendered menu: a raster of fixed pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositedImage {
    pixmap: Pixmap,
}

impl CompositedImage {
    pub(crate) fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // Pixmap::pixel only bounds-checks the flat index.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Convert to a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width(), self.height());
        for (dst, px) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = px.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, MenuError> {
        let rgba = self.to_rgba_image();
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf).write_image(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ColorType::Rgba8,
        )?;
        Ok(buf)
    }

    /// JPEG has no alpha channel; transparency is dropped.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, MenuError> {
        let rgb = image::DynamicImage::ImageRgba8(self.to_rgba_image()).to_rgb8();
        let mut buf = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality).write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ColorType::Rgb8,
        )?;
        Ok(buf)
    }

    /// Write to `path`, choosing JPEG for `.jpg`/`.jpeg` and PNG otherwise.
    pub fn save(&self, path: &Path) -> Result<(), MenuError> {
        let is_jpeg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
            .unwrap_or(false);
        let bytes = if is_jpeg {
            self.encode_jpeg(JPEG_QUALITY)?
        } else {
            self.encode_png()?
        };
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// `cardapio-YYYY-MM-DD.png`, dated by the menu or by today.
pub fn default_file_name(date: Option<NaiveDate>) -> String {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    format!("cardapio-{}.png", date.format("%Y-%m-%d"))
}
