//! Conversion settings, optionally read from a JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{GRID_COLUMNS, GRID_ROWS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tile_size: u32,
    /// The padding column after each grid row is part of the map.
    pub map_width: usize,
    pub map_height: usize,
    pub properties_tileset: String,
    pub items_tileset: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: 32,
            map_width: GRID_COLUMNS + 1,
            map_height: GRID_ROWS,
            properties_tileset: "properties.tsj".into(),
            items_tileset: "pat_item.tsj".into(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Parsing config {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
