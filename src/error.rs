//! Structured error types for the menu compositor.
//!
//! Rendering itself has a single failure mode (an empty menu). Everything
//! else here comes from the edges: parsing menu JSON, reading config,
//! loading fonts, and exporting the finished image.

use thiserror::Error;

/// The unified error type returned by all public menucanvas API functions.
#[derive(Debug, Error)]
pub enum MenuError {
    /// JSON input failed to parse as a menu record.
    #[error("Failed to parse menu: {source}{}", format_hint(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// The document cannot be laid out (e.g. it has no entries).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The data provider has no menu matching the request.
    #[error("Menu not found: {0}")]
    NotFound(String),
    /// A configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),
    /// A configured font could not be loaded or parsed.
    #[error("Font error: {0}")]
    Font(String),
    /// The composited image could not be encoded.
    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the menu schema. Check field names like menuItems and deliveryTax.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        MenuError::Parse { source: e, hint }
    }
}
