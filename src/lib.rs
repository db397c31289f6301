//! # menucanvas
//!
//! Renders a restaurant menu as a single shareable image.
//!
//! A menu is a handful of entries (name, description, price) plus delivery
//! details. The compositor places the entries on a fixed-size canvas so
//! they always fit: descriptions wrap to at most two lines, rows grow when
//! they wrap, and the gaps between rows stretch or shrink with the count.
//! Long menus degrade to tighter spacing instead of failing.
//!
//! ## Architecture
//!
//! ```text
//! Menu record (JSON / MenuProvider)
//!       ↓
//!   [model]    : MenuRecord → MenuDocument (entries + footer)
//!       ↓
//!   [text]     : Description wrapping against font metrics
//!       ↓
//!   [layout]   : Content band, row heights, spacing, centering
//!       ↓
//!   [raster]   : Background, panels, glyphs, footer → CompositedImage
//! ```

pub mod config;
pub mod currency;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod output;
pub mod provider;
pub mod raster;
pub mod style;
pub mod text;

use log::{info, warn};

use config::MenuConfig;
pub use error::MenuError;
use font::FontContext;
use layout::{LayoutEngine, MenuLayout};
use model::{MenuDocument, MenuRecord};
pub use output::CompositedImage;
use raster::{Background, Rasterizer};
use style::Color;

/// Renders menus with one configuration and one set of fonts.
///
/// Both are read-only, so a renderer can be reused for any number of menus.
pub struct MenuRenderer {
    config: MenuConfig,
    font_context: FontContext,
    engine: LayoutEngine,
}

impl MenuRenderer {
    pub fn new(config: MenuConfig, font_context: FontContext) -> Self {
        let engine = LayoutEngine::new(&config);
        Self {
            config,
            font_context,
            engine,
        }
    }

    /// Build a renderer, resolving fonts as the config describes.
    pub fn from_config(config: MenuConfig) -> Result<Self, MenuError> {
        let font_context = FontContext::from_config(&config.fonts)?;
        Ok(Self::new(config, font_context))
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn font_context(&self) -> &FontContext {
        &self.font_context
    }

    /// Compute the layout without drawing anything.
    pub fn layout(&self, document: &MenuDocument) -> Result<MenuLayout, MenuError> {
        self.engine.layout(document, &self.font_context)
    }

    /// Load the configured background, or fall back to the gradient.
    ///
    /// Never fails: every load error ends in the fallback.
    pub fn background(&self) -> Background {
        let canvas = self.config.canvas;
        let fallback = Background::Gradient {
            top: Color::hex(&self.config.background.gradient_top),
            bottom: Color::hex(&self.config.background.gradient_bottom),
        };

        let Some(source) = &self.config.background.source else {
            return fallback;
        };
        match image_loader::load_background(source, canvas.width, canvas.height) {
            Ok(pixmap) => Background::Image(pixmap),
            Err(e) => {
                warn!("Background unavailable, using gradient: {}", e);
                fallback
            }
        }
    }

    /// Render `document` to an image of the configured canvas size.
    pub fn render(&self, document: &MenuDocument) -> Result<CompositedImage, MenuError> {
        let layout = self.layout(document)?;
        let image = Rasterizer::new(&self.font_context).paint(&layout, self.background())?;
        info!(
            "Rendered {} entries at {}x{}",
            layout.rows.len(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Render a stored menu record.
    pub fn render_record(&self, record: &MenuRecord) -> Result<CompositedImage, MenuError> {
        self.render(&record.to_document())
    }
}

/// Render a document with the default configuration and system fonts.
pub fn render(document: &MenuDocument) -> Result<CompositedImage, MenuError> {
    MenuRenderer::from_config(MenuConfig::default())?.render(document)
}

/// Render a menu record described as JSON with the default configuration.
pub fn render_json(json: &str) -> Result<CompositedImage, MenuError> {
    let record: MenuRecord = serde_json::from_str(json)?;
    render(&record.to_document())
}
