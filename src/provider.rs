//! # Menu Data Providers
//!
//! The compositor doesn't know where menus come from. A [`MenuProvider`] is
//! handed to whoever needs menus, once, instead of being reached for as
//! shared global state. [`JsonMenuStore`] is the file-backed provider used
//! by the CLI: it reads what the menus API returns, either a single record
//! or the whole list.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::MenuError;
use crate::model::MenuRecord;

/// Source of menu records.
pub trait MenuProvider {
    /// Fetch the menu with `id`, or the current one when `id` is `None`.
    fn fetch_menu(&self, id: Option<&str>) -> Result<MenuRecord, MenuError>;
}

/// Either one record or a list, as stored on disk.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredMenus {
    Many(Vec<MenuRecord>),
    One(Box<MenuRecord>),
}

/// Menus loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonMenuStore {
    menus: Vec<MenuRecord>,
    origin: Option<PathBuf>,
}

impl JsonMenuStore {
    /// Parse a JSON document holding one record or an array of records.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let menus = match serde_json::from_str::<StoredMenus>(json) {
            Ok(StoredMenus::Many(menus)) => menus,
            Ok(StoredMenus::One(menu)) => vec![*menu],
            // Untagged errors are vague; re-parse as a single record to get
            // a useful message and hint.
            Err(_) => vec![serde_json::from_str::<MenuRecord>(json)?],
        };
        Ok(Self {
            menus,
            origin: None,
        })
    }

    pub fn open(path: &Path) -> Result<Self, MenuError> {
        let json = std::fs::read_to_string(path)?;
        let mut store = Self::from_json(&json)?;
        debug!("Loaded {} menu(s) from {}", store.menus.len(), path.display());
        store.origin = Some(path.to_path_buf());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    fn describe_origin(&self) -> String {
        match &self.origin {
            Some(path) => path.display().to_string(),
            None => "input".to_string(),
        }
    }
}

impl MenuProvider for JsonMenuStore {
    /// With an id, that menu. Without one, the first active menu, or the
    /// first menu if none is active.
    fn fetch_menu(&self, id: Option<&str>) -> Result<MenuRecord, MenuError> {
        let found = match id {
            Some(id) => self.menus.iter().find(|menu| menu.id == id),
            None => self
                .menus
                .iter()
                .find(|menu| menu.is_active)
                .or_else(|| self.menus.first()),
        };
        found.cloned().ok_or_else(|| {
            MenuError::NotFound(match id {
                Some(id) => format!("no menu with id '{}' in {}", id, self.describe_origin()),
                None => format!("{} contains no menus", self.describe_origin()),
            })
        })
    }
}
