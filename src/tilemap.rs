//! Destination tile-map structure.
//!
//! Mirrors the parts of a Tiled map the converter fills in: an ordered
//! tileset list handing out global tile ids, named tile layers addressed
//! by `(x, y)`, and a flat string property store.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ProjectError;

/// Global tile id; `0` marks an empty cell.
pub type Gid = u32;

/// A Tiled JSON tileset file, only the fields the converter needs; the
/// map refers to the file by name, so the rest stays in the file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TilesetDef {
    pub name: String,
    pub tilecount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    pub def: TilesetDef,
    /// File name the map refers to the tileset by.
    pub source: String,
    pub first_gid: Gid,
}

impl Tileset {
    /// Global id of a tileset-local index, if the tileset has it.
    pub fn gid(&self, local: i64) -> Option<Gid> {
        let local = u32::try_from(local).ok()?;
        if local >= self.def.tilecount {
            return None;
        }
        self.first_gid.checked_add(local)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` cells.
    pub data: Vec<Gid>,
}

impl TileLayer {
    fn new(name: &str, width: usize, height: usize) -> Self {
        Self {
            name: name.to_owned(),
            width,
            height,
            data: vec![0; width * height],
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Gid> {
        self.index(x, y).map(|i| self.data[i])
    }

    pub fn set(&mut self, x: i64, y: i64, gid: Gid) -> Result<(), ProjectError> {
        let i = self.index(x, y).ok_or_else(|| ProjectError::OutOfBounds {
            layer: self.name.clone(),
            x,
            y,
        })?;
        self.data[i] = gid;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tilesets: Vec<Tileset>,
    pub layers: Vec<TileLayer>,
    pub properties: BTreeMap<String, String>,
}

impl TileMap {
    pub fn new(width: usize, height: usize, tile_width: u32, tile_height: u32) -> Self {
        Self {
            width,
            height,
            tile_width,
            tile_height,
            tilesets: Vec::new(),
            layers: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Append a tileset after the existing ones and return its index.
    ///
    /// Fails when the tileset's ids would run past `u32::MAX`.
    pub fn append_tileset(
        &mut self,
        def: TilesetDef,
        source: impl Into<String>,
    ) -> Result<usize, ProjectError> {
        let first_gid = match self.tilesets.last() {
            Some(last) => last.first_gid.checked_add(last.def.tilecount),
            None => Some(1),
        };
        let overflow = || ProjectError::GidOverflow {
            tileset: def.name.clone(),
        };
        let first_gid = first_gid.ok_or_else(overflow)?;
        first_gid.checked_add(def.tilecount).ok_or_else(overflow)?;

        self.tilesets.push(Tileset {
            def,
            source: source.into(),
            first_gid,
        });
        Ok(self.tilesets.len() - 1)
    }

    /// Add an empty layer the size of the map; an existing layer of the
    /// same name is kept as is.
    pub fn add_layer(&mut self, name: &str) {
        if self.layer(name).is_none() {
            self.layers.push(TileLayer::new(name, self.width, self.height));
        }
    }

    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Result<&mut TileLayer, ProjectError> {
        self.layers
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| ProjectError::MissingLayer(name.to_owned()))
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        self.properties.insert(name.to_owned(), value.into());
    }
}
