//! # Background Image Loading
//!
//! Loads the menu's background from a file path, a data URI, or a raw
//! base64 string, decodes it (JPEG or PNG), and stretches it to the canvas
//! size. Errors are plain strings: the compositor never surfaces them, it
//! logs them and paints the fallback gradient instead.

use image::imageops::FilterType;
use tiny_skia::{IntSize, Pixmap};

/// Load `src` and return it as a premultiplied pixmap of exactly
/// `width × height`.
///
/// Supported `src` formats:
/// - `data:image/...;base64,...` data URI
/// - file path (absolute, relative with `./` or `../`, or ending in an
///   image extension)
/// - raw base64-encoded image data
pub fn load_background(src: &str, width: u32, height: u32) -> Result<Pixmap, String> {
    let raw_bytes = read_source_bytes(src)?;
    decode_to_pixmap(&raw_bytes, width, height)
}

/// Resolve the source string to raw image bytes.
fn read_source_bytes(src: &str) -> Result<Vec<u8>, String> {
    // Data URI: data:image/png;base64,iVBOR...
    if src.starts_with("data:image/") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| "Invalid data URI: missing comma".to_string())?;
        let b64_data = &src[comma_pos + 1..];
        return base64_decode(b64_data);
    }

    if looks_like_path(src) {
        return std::fs::read(src)
            .map_err(|e| format!("Failed to read image file '{}': {}", src, e));
    }

    base64_decode(src)
}

/// Base64 strings can contain '/', so only explicit prefixes and image
/// extensions count as paths.
fn looks_like_path(src: &str) -> bool {
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return true;
    }
    let lower = src.to_ascii_lowercase();
    [".jpg", ".jpeg", ".png"].iter().any(|ext| lower.ends_with(ext))
}

fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input.trim())
        .map_err(|e| format!("Base64 decode error: {}", e))
}

/// Detect the format from magic bytes, decode, and stretch to the canvas.
fn decode_to_pixmap(data: &[u8], width: u32, height: u32) -> Result<Pixmap, String> {
    if data.len() < 4 {
        return Err("Image data too short".to_string());
    }

    let format = if is_jpeg(data) {
        image::ImageFormat::Jpeg
    } else if is_png(data) {
        image::ImageFormat::Png
    } else {
        return Err("Unsupported image format (expected JPEG or PNG)".to_string());
    };

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| format!("Failed to decode background: {}", e))?;

    let rgba = img.to_rgba8();
    let rgba = if rgba.width() == width && rgba.height() == height {
        rgba
    } else {
        image::imageops::resize(&rgba, width, height, FilterType::Triangle)
    };

    let mut pixels = rgba.into_raw();
    premultiply(&mut pixels);

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| format!("Invalid canvas size {}x{}", width, height))?;
    Pixmap::from_vec(pixels, size).ok_or_else(|| "Failed to build background pixmap".to_string())
}

/// tiny-skia stores premultiplied RGBA.
fn premultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

fn is_png(data: &[u8]) -> bool {
    data.len() >= 4 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
}
