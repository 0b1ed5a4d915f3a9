//! Projects a decoded ASKM map onto tile layers.
//!
//! Only terrain, properties, items and the two movement scalars have a
//! home in the output; every other decoded field is left to the caller.

use log::debug;

use crate::error::ProjectError;
use crate::model::DecodedMap;
use crate::processor::lookup::{GidLookup, PropertyCodes};
use crate::tilemap::TileMap;

pub const TILES_LAYER: &str = "tiles";
pub const PROPERTIES_LAYER: &str = "properties";
pub const ITEMS_LAYER: &str = "items";

/// Each item occupies a run of this many animation frames in the icon
/// tileset; the first frame is the placed icon.
pub const ITEM_FRAMES: i64 = 6;

pub struct Tables<'a> {
    pub terrain: &'a dyn GidLookup,
    pub properties: &'a dyn GidLookup,
    pub items: &'a dyn GidLookup,
    pub property_codes: &'a PropertyCodes,
}

fn lookup(table: &dyn GidLookup, name: &'static str, index: i64) -> Result<u32, ProjectError> {
    table
        .gid(index)
        .ok_or(ProjectError::LookupMiss { table: name, index })
}

/// Fill the `tiles`, `properties` and `items` layers and the map-level
/// `jump_reduction` / `inertia` properties of `out`.
pub fn project(map: &DecodedMap, tables: &Tables<'_>, out: &mut TileMap) -> Result<(), ProjectError> {
    for name in [TILES_LAYER, PROPERTIES_LAYER, ITEMS_LAYER] {
        out.add_layer(name);
    }

    // tiles are keyed (row, column); layers are addressed (x, y)
    for (&(row, column), tile) in &map.tiles {
        let (x, y) = (column as i64, row as i64);

        let tile_gid = lookup(tables.terrain, "terrain", tile.appearance_id.into())?;
        out.layer_mut(TILES_LAYER)?.set(x, y, tile_gid)?;

        let property_index = tables.property_codes.translate(tile.property_id);
        let property_gid = lookup(tables.properties, "property", property_index)?;
        out.layer_mut(PROPERTIES_LAYER)?.set(x, y, property_gid)?;
    }
    debug!("{} terrain cells projected", map.tiles.len());

    // items are already keyed (column, row)
    let items_layer = out.layer_mut(ITEMS_LAYER)?;
    for (&(column, row), &item_id) in &map.items {
        let icon = i64::from(item_id) * ITEM_FRAMES;
        let item_gid = lookup(tables.items, "item icon", icon)?;
        items_layer.set(column.into(), row.into(), item_gid)?;
    }
    debug!("{} items projected", map.items.len());

    out.set_property("jump_reduction", map.jump_reduction.to_string());
    out.set_property("inertia", map.inertia.to_string());
    Ok(())
}
