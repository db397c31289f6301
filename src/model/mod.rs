//! # Menu Model
//!
//! Two shapes live here. [`MenuRecord`] is what the data provider stores and
//! serves: camelCase JSON with ids, timestamps and WhatsApp ordering fields.
//! [`MenuDocument`] is the compositor's input: just the entries and the
//! footer metadata, with nothing the layout doesn't read.
//!
//! Neither shape is validated here. A negative price or an empty name is the
//! provider's problem; the compositor draws whatever it is given.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One menu line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// Delivery and ordering metadata drawn in the footer band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterInfo {
    pub delivery_tax: f64,
    pub delivery_day: String,
    pub order_cutoff_day: String,
    pub order_cutoff_time: String,
}

impl FooterInfo {
    /// The cutoff value as shown in the footer: `"<day> <time>"`.
    pub fn order_cutoff(&self) -> String {
        format!("{} {}", self.order_cutoff_day, self.order_cutoff_time)
    }
}

/// The complete input to the compositor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    pub entries: Vec<MenuEntry>,
    pub footer: FooterInfo,
}

impl MenuDocument {
    pub fn new(entries: Vec<MenuEntry>, footer: FooterInfo) -> Self {
        Self { entries, footer }
    }

    /// Indices into `entries` in display order: price descending, ties in
    /// input order.
    pub fn display_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        // sort_by is stable, so equal prices keep their input order.
        order.sort_by(|&a, &b| self.entries[b].price.total_cmp(&self.entries[a].price));
        order
    }
}

// ── Stored records ──────────────────────────────────────────────

/// A menu as the data provider serves it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub delivery_tax: f64,
    #[serde(default)]
    pub delivery_day: String,
    #[serde(default)]
    pub whatsapp_order_day: String,
    #[serde(default)]
    pub whatsapp_order_time: String,
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default)]
    pub menu_items: Vec<MenuItemRecord>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// A menu item as stored: a copy of a catalog item, frozen into the menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub order: i64,
}

impl MenuRecord {
    /// Project the stored record onto the compositor's input.
    ///
    /// Items are taken in their stored `order`; the compositor re-sorts by
    /// price anyway, but ties keep this order.
    pub fn to_document(&self) -> MenuDocument {
        let mut items: Vec<&MenuItemRecord> = self.menu_items.iter().collect();
        items.sort_by_key(|item| item.order);

        MenuDocument {
            entries: items
                .into_iter()
                .map(|item| MenuEntry::new(item.name.clone(), item.description.clone(), item.price))
                .collect(),
            footer: FooterInfo {
                delivery_tax: self.delivery_tax,
                delivery_day: self.delivery_day.clone(),
                order_cutoff_day: self.whatsapp_order_day.clone(),
                order_cutoff_time: self.whatsapp_order_time.clone(),
            },
        }
    }

    /// The calendar date used to name exported images.
    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.date_naive())
    }
}
