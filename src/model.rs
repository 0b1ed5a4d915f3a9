// numeric constants that describe the ASKM grid
pub const GRID_ROWS: usize = 48;
pub const GRID_COLUMNS: usize = 77;
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLUMNS; // 3696

pub const DOOR_SLOTS: usize = 4;

use std::collections::BTreeMap;

/// `(row, column)` – key order used by `tiles` and `enemies`.
pub type RowCol = (usize, usize);

/// `(column, row)` – key order used by `items` and `moving_tiles`.
///
/// Sparse records come straight from the file, so the coordinates stay
/// signed until something places them on a layer.
pub type ColRow = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub appearance_id: i32,
    pub property_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Door {
    pub door_id: i32,
    pub target_door_id: i32,
}

/// Entire map as it comes out of the ASKM decoder.
///
/// Built once by [`crate::parser::decode_askm`] and never mutated; every
/// field mirrors one entry of the fixed file grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMap {
    pub tileset_name: String,
    pub background_name: String,
    pub background_music_name: String,

    /// Dense grid, exactly [`GRID_CELLS`] entries.
    pub tiles: BTreeMap<RowCol, Tile>,
    /// Enemies are stored on the file as `(column, row, id)` but keyed
    /// `(row, column)` here.
    pub enemies: BTreeMap<(i32, i32), i32>,
    pub enemy_set: i32,
    pub items: BTreeMap<ColRow, i32>,
    pub moving_tiles: BTreeMap<ColRow, i32>,

    pub bubble_key: [i32; 3],
    pub key: [i32; 3],
    pub chest: [i32; 3],

    /// Slot index `0..DOOR_SLOTS` → door.
    pub doors: BTreeMap<usize, Door>,

    pub jump_reduction: i32,
    pub inertia: i32,
    pub time: i32,
}
