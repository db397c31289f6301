//! # Menu Layout Engine
//!
//! Turns a [`MenuDocument`] into positioned panels and text runs. Nothing
//! is drawn here; the rasterizer consumes the resulting [`MenuLayout`]
//! as-is, and the same structure can be serialized for inspection.
//!
//! ## Canvas regions
//!
//! ```text
//!  0 ┌──────────────────────────────────────────┐
//!    │ header (menu start + title area)         │
//!  menu_top ─ ─ ─ ─ ┌───────────────────────┐   │
//!    │              │ content band: rows    │   │
//!    │              └───────────────────────┘   │
//!  footer_top − margin                          │
//!  footer_top ──────────────────────────────────┤
//!    │  day          cutoff          tax        │
//!  H └──────────────────────────────────────────┘
//! ```
//!
//! The band starts at 28% of the width and spans 70% of it. Rows are sorted
//! by price, descending, measured (a description may wrap to two lines),
//! then spaced with [`spacing::distribute`].
//!
//! All absolute lengths below are in reference units and are multiplied by
//! the canvas scale factor before use.

pub mod spacing;

use log::{debug, warn};
use serde::Serialize;

use crate::config::{CanvasConfig, CurrencyConfig, FooterLabels, MenuConfig};
use crate::currency::format_price;
use crate::error::MenuError;
use crate::font::FontContext;
use crate::model::MenuDocument;
use crate::style::{Color, MenuTheme, TextStyle};
use crate::text::wrap_description;

/// Geometry of the reference menu, in reference units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConstants {
    pub content_x_ratio: f64,
    pub content_width_ratio: f64,
    pub menu_start_y: f64,
    pub header_height: f64,
    pub footer_height: f64,
    pub footer_margin: f64,
    /// Subtracted from the band width to get the description wrap width.
    pub description_inset: f64,
    pub base_row_height: f64,
    pub wrapped_row_extra: f64,
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub panel_padding: f64,
    pub panel_top_offset: f64,
    pub panel_radius: f64,
    pub text_inset: f64,
    pub name_baseline: f64,
    pub description_baseline: f64,
    pub description_line_height: f64,
    pub price_baseline: f64,
    pub footer_label_baseline: f64,
    pub footer_value_baseline: f64,
    /// Footer columns sit at `width / divisor`.
    pub delivery_day_divisor: f64,
    pub order_cutoff_divisor: f64,
    pub delivery_tax_divisor: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            content_x_ratio: 0.28,
            content_width_ratio: 0.70,
            menu_start_y: 80.0,
            header_height: 120.0,
            footer_height: 140.0,
            footer_margin: 30.0,
            description_inset: 250.0,
            base_row_height: 60.0,
            wrapped_row_extra: 20.0,
            min_spacing: 15.0,
            max_spacing: 35.0,
            panel_padding: 10.0,
            panel_top_offset: 15.0,
            panel_radius: 50.0,
            text_inset: 25.0,
            name_baseline: 20.0,
            description_baseline: 45.0,
            description_line_height: 18.0,
            price_baseline: 25.0,
            footer_label_baseline: 85.0,
            footer_value_baseline: 115.0,
            delivery_day_divisor: 7.0,
            order_cutoff_divisor: 2.7,
            delivery_tax_divisor: 1.7,
        }
    }
}

// ── Layout output ───────────────────────────────────────────────

/// Complete layout of one menu image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuLayout {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub band: ContentBand,
    pub footer_top: f64,
    pub spacing: f64,
    pub start_y: f64,
    pub content_height: f64,
    pub overflows: bool,
    pub rows: Vec<RowLayout>,
    pub footer: Vec<FooterCell>,
}

/// The rectangle reserved for rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBand {
    pub x: f64,
    pub width: f64,
    pub top: f64,
    pub bottom: f64,
}

impl ContentBand {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// One entry's row: its panel and its text runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout {
    /// Index into the document's entries.
    pub entry_index: usize,
    pub y: f64,
    pub height: f64,
    pub panel: Panel,
    pub name: PlacedText,
    pub description: Vec<PlacedText>,
    pub description_truncated: bool,
    pub price: PlacedText,
}

/// A rounded rectangle drawn behind a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub color: Color,
}

/// A run of text anchored at `x` on the baseline `baseline`. Its style's
/// font size is already scaled to pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedText {
    pub text: String,
    pub x: f64,
    pub baseline: f64,
    pub style: TextStyle,
}

/// A footer label and the value drawn under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterCell {
    pub label: PlacedText,
    pub value: PlacedText,
}

// ── Engine ──────────────────────────────────────────────────────

/// Computes menu layouts for one canvas configuration.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    canvas: CanvasConfig,
    currency: CurrencyConfig,
    labels: FooterLabels,
    theme: MenuTheme,
    constants: LayoutConstants,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(&MenuConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            canvas: config.canvas,
            currency: config.currency.clone(),
            labels: config.footer.clone(),
            theme: MenuTheme::default(),
            constants: LayoutConstants::default(),
        }
    }

    pub fn with_theme(mut self, theme: MenuTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn constants(&self) -> &LayoutConstants {
        &self.constants
    }

    /// The content band for this canvas, independent of any document.
    pub fn content_band(&self) -> ContentBand {
        let c = &self.constants;
        let s = self.canvas.scale();
        let width = self.canvas.width as f64;
        ContentBand {
            x: width * c.content_x_ratio,
            width: width * c.content_width_ratio,
            top: (c.menu_start_y + c.header_height) * s,
            bottom: self.footer_top() - c.footer_margin * s,
        }
    }

    pub fn footer_top(&self) -> f64 {
        self.canvas.height as f64 - self.constants.footer_height * self.canvas.scale()
    }

    /// Lay out `document`. Fails only when it has no entries.
    pub fn layout(
        &self,
        document: &MenuDocument,
        font_context: &FontContext,
    ) -> Result<MenuLayout, MenuError> {
        if document.entries.is_empty() {
            return Err(MenuError::InvalidInput(
                "menu has no entries to lay out".to_string(),
            ));
        }

        let c = &self.constants;
        let s = self.canvas.scale();
        let band = self.content_band();
        let wrap_width = band.width - c.description_inset * s;
        let description_size = self.theme.description.font_size * s;

        let order = document.display_order();

        // Measure every row first; spacing depends on the total.
        let wrapped: Vec<_> = order
            .iter()
            .map(|&i| {
                wrap_description(
                    font_context,
                    &document.entries[i].description,
                    wrap_width,
                    description_size,
                )
            })
            .collect();
        let heights: Vec<f64> = wrapped
            .iter()
            .map(|w| {
                let extra = if w.line_count() > 1 {
                    c.wrapped_row_extra
                } else {
                    0.0
                };
                (c.base_row_height + extra) * s
            })
            .collect();

        let decision = spacing::distribute(
            &heights,
            band.height(),
            c.min_spacing * s,
            c.max_spacing * s,
        );
        if decision.overflows {
            warn!(
                "{} rows need {:.1}px but the content band has {:.1}px; rows will overflow",
                heights.len(),
                decision.content_height,
                band.height()
            );
        }

        let start_y = band.top + decision.offset;
        let mut rows = Vec::with_capacity(order.len());
        let mut y = start_y;

        for ((&entry_index, wrap), &height) in order.iter().zip(wrapped).zip(heights.iter()) {
            let entry = &document.entries[entry_index];
            let text_x = band.x + c.text_inset * s;

            let description = wrap
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| PlacedText {
                    text: line.clone(),
                    x: text_x,
                    baseline: y + (c.description_baseline + i as f64 * c.description_line_height) * s,
                    style: self.scaled(self.theme.description),
                })
                .collect();

            rows.push(RowLayout {
                entry_index,
                y,
                height,
                panel: Panel {
                    x: band.x - c.panel_padding * s,
                    y: y - c.panel_top_offset * s,
                    width: band.width + c.panel_padding * s,
                    height: height + c.panel_padding * s,
                    radius: c.panel_radius * s,
                    color: self.theme.panel,
                },
                name: PlacedText {
                    text: entry.name.clone(),
                    x: text_x,
                    baseline: y + c.name_baseline * s,
                    style: self.scaled(self.theme.name),
                },
                description,
                description_truncated: wrap.truncated,
                price: PlacedText {
                    text: format_price(entry.price, &self.currency),
                    x: band.right() - c.text_inset * s,
                    baseline: y + c.price_baseline * s,
                    style: self.scaled(self.theme.price),
                },
            });

            y += height + decision.spacing;
        }

        debug!(
            "Laid out {} rows: spacing {:.2}, start y {:.2}, content height {:.2}",
            rows.len(),
            decision.spacing,
            start_y,
            decision.content_height
        );

        Ok(MenuLayout {
            width: self.canvas.width,
            height: self.canvas.height,
            scale: s,
            band,
            footer_top: self.footer_top(),
            spacing: decision.spacing,
            start_y,
            content_height: decision.content_height,
            overflows: decision.overflows,
            rows,
            footer: self.footer_cells(document),
        })
    }

    fn footer_cells(&self, document: &MenuDocument) -> Vec<FooterCell> {
        let c = &self.constants;
        let s = self.canvas.scale();
        let width = self.canvas.width as f64;
        let footer_top = self.footer_top();
        let footer = &document.footer;

        let cell = |divisor: f64, label: &str, value: String, value_style: TextStyle| {
            let x = width / divisor;
            FooterCell {
                label: PlacedText {
                    text: label.to_string(),
                    x,
                    baseline: footer_top + c.footer_label_baseline * s,
                    style: self.scaled(self.theme.footer_label),
                },
                value: PlacedText {
                    text: value,
                    x,
                    baseline: footer_top + c.footer_value_baseline * s,
                    style: self.scaled(value_style),
                },
            }
        };

        vec![
            cell(
                c.delivery_day_divisor,
                &self.labels.delivery_day_label,
                footer.delivery_day.clone(),
                self.theme.delivery_day_value,
            ),
            cell(
                c.order_cutoff_divisor,
                &self.labels.order_cutoff_label,
                footer.order_cutoff(),
                self.theme.order_cutoff_value,
            ),
            cell(
                c.delivery_tax_divisor,
                &self.labels.delivery_tax_label,
                format_price(footer.delivery_tax, &self.currency),
                self.theme.delivery_tax_value,
            ),
        ]
    }

    fn scaled(&self, style: TextStyle) -> TextStyle {
        TextStyle {
            font_size: style.font_size * self.canvas.scale(),
            ..style
        }
    }
}
