//! Compositor configuration.
//!
//! Settings load from a TOML file (conventionally `menucanvas.toml`). Every
//! key is optional; anything missing takes the reference menu's value, so an
//! empty file renders exactly like no file at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::MenuError;

/// Reference canvas width. Unit-valued layout constants are expressed
/// against this size.
pub const REFERENCE_WIDTH: u32 = 1280;
/// Reference canvas height.
pub const REFERENCE_HEIGHT: u32 = 1277;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub canvas: CanvasConfig,
    pub background: BackgroundConfig,
    pub fonts: FontConfig,
    pub currency: CurrencyConfig,
    pub footer: FooterLabels,
}

/// Output canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

/// Background asset. Gradient colors are used when the asset can't be
/// loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// File path, data URI, or raw base64 image data.
    pub source: Option<String>,
    pub gradient_top: String,
    pub gradient_bottom: String,
}

/// Font files. Unset paths fall back to system discovery when `system` is
/// enabled, and to built-in metrics otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub system: bool,
}

/// Currency display format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub decimal_separator: char,
    pub group_separator: char,
}

/// Footer label texts, drawn above each value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLabels {
    pub delivery_day_label: String,
    pub order_cutoff_label: String,
    pub delivery_tax_label: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            source: Some("public/fundo.jpg".to_string()),
            gradient_top: "#f8f9fa".to_string(),
            gradient_bottom: "#e9ecef".to_string(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: None,
            bold: None,
            system: true,
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        // pt-BR / BRL
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            group_separator: '.',
        }
    }
}

impl Default for FooterLabels {
    fn default() -> Self {
        Self {
            delivery_day_label: "Dia das entregas".to_string(),
            order_cutoff_label: "Pedidos até".to_string(),
            delivery_tax_label: "Taxa de entrega".to_string(),
        }
    }
}

impl MenuConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MenuError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, MenuError> {
        toml::from_str(contents).map_err(|e| MenuError::Config(format!("Invalid config: {}", e)))
    }
}

impl CanvasConfig {
    /// Factor applied to unit-valued constants so the layout keeps its
    /// proportions at other resolutions.
    pub fn scale(&self) -> f64 {
        let sx = self.width as f64 / REFERENCE_WIDTH as f64;
        let sy = self.height as f64 / REFERENCE_HEIGHT as f64;
        sx.min(sy)
    }
}
