//! Turns a decoded ASKM map into a tile-layer map.
pub mod lookup;
pub mod projector;

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::model::DecodedMap;
use crate::tilemap::{TileMap, TilesetDef};
use lookup::PropertyCodes;
use projector::Tables;

/// Terrain tileset file for an engine-side image name (`tiles01.png` →
/// `tiles01.tsj`).
pub fn terrain_tileset_file(tileset_name: &str) -> String {
    match tileset_name.strip_suffix(".png") {
        Some(stem) => format!("{stem}.tsj"),
        None => format!("{tileset_name}.tsj"),
    }
}

pub fn load_tileset(path: &Path) -> Result<TilesetDef> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Reading tileset {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Parsing tileset {}", path.display()))
}

/// Build the destination map: load the three tilesets from `resource_dir`,
/// append them in order and project `map` onto it.
pub fn run(map: &DecodedMap, config: &Config, resource_dir: &Path) -> Result<TileMap> {
    let terrain_file = terrain_tileset_file(&map.tileset_name);
    let files = [
        terrain_file.as_str(),
        config.properties_tileset.as_str(),
        config.items_tileset.as_str(),
    ];

    let mut out = TileMap::new(
        config.map_width,
        config.map_height,
        config.tile_size,
        config.tile_size,
    );
    for file in files {
        let def = load_tileset(&resource_dir.join(file))?;
        info!("Tileset `{}` loaded, {} tiles", def.name, def.tilecount);
        out.append_tileset(def, file)
            .with_context(|| format!("Appending tileset {file}"))?;
    }

    // projection writes layers while reading tilesets
    let [terrain, properties, items] = [0, 1, 2].map(|i| out.tilesets[i].clone());
    let property_codes = PropertyCodes::default();
    let tables = Tables {
        terrain: &terrain,
        properties: &properties,
        items: &items,
        property_codes: &property_codes,
    };
    projector::project(map, &tables, &mut out).with_context(|| "Projecting map onto tile layers")?;
    info!("Projected {} layers", out.layers.len());

    Ok(out)
}
