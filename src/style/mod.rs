//! # Styles
//!
//! Colors, weights and the fixed text styles of the menu. There is no
//! cascade here: every element of the menu has exactly one style, and the
//! layout scales its size by the canvas factor.

use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb` or `#rrggbb`. Anything else is black.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::BLACK;
        }
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// The color as 8-bit channels, rounded.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        let [r, g, b, a] = self.to_rgba8();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// Everything needed to measure and draw one run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in units at reference resolution.
    pub font_size: f64,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(font_size: f64, weight: FontWeight, color: Color, align: TextAlign) -> Self {
        Self {
            font_size,
            weight,
            color,
            align,
        }
    }
}

/// The fixed look of a menu. Sizes are in reference units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTheme {
    pub name: TextStyle,
    pub description: TextStyle,
    pub price: TextStyle,
    pub footer_label: TextStyle,
    pub delivery_tax_value: TextStyle,
    pub delivery_day_value: TextStyle,
    pub order_cutoff_value: TextStyle,
    /// Fill behind each row.
    pub panel: Color,
}

impl Default for MenuTheme {
    fn default() -> Self {
        let footer = |color| TextStyle::new(30.0, FontWeight::Bold, color, TextAlign::Center);
        Self {
            name: TextStyle::new(22.0, FontWeight::Bold, Color::BLACK, TextAlign::Left),
            description: TextStyle::new(
                16.0,
                FontWeight::Regular,
                Color::hex("#333333"),
                TextAlign::Left,
            ),
            price: TextStyle::new(20.0, FontWeight::Bold, Color::hex("#d32f2f"), TextAlign::Right),
            footer_label: footer(Color::WHITE),
            delivery_tax_value: footer(Color::hex("#ffd700")),
            delivery_day_value: footer(Color::hex("#4caf50")),
            order_cutoff_value: footer(Color::hex("#ff9800")),
            panel: Color::WHITE.with_alpha(0.6),
        }
    }
}
