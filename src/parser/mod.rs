pub mod cursor;
pub mod grammar;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::error::AskmError;
use crate::model::{DecodedMap, Door, Tile};
use cursor::Cursor;
use grammar::{ASKM_GRAMMAR, Records, Scalar, Special, Step, Text};

/// Read an ASKM file from disk and decode it.
pub fn load_askm(path: &Path) -> Result<DecodedMap> {
    let bytes = std::fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    info!("File loaded, size: {} bytes", bytes.len());

    let map = decode_askm(&bytes).with_context(|| format!("Decoding {}", path.display()))?;
    info!(
        "Map decoded: tileset `{}`, {} enemies, {} items, {} moving tiles",
        map.tileset_name,
        map.enemies.len(),
        map.items.len(),
        map.moving_tiles.len()
    );
    Ok(map)
}

/// Decode a whole ASKM buffer in one forward pass.
///
/// Trailing bytes after `time` are ignored.
pub fn decode_askm(bytes: &[u8]) -> Result<DecodedMap, AskmError> {
    let mut cursor = Cursor::new(bytes);
    let mut builder = MapBuilder::default();

    for step in ASKM_GRAMMAR {
        debug!("byte {:>6}: {:?}", cursor.offset(), step);
        builder.apply(*step, &mut cursor)?;
    }

    if cursor.remaining() > 0 {
        debug!("{} trailing bytes ignored", cursor.remaining());
    }
    Ok(builder.finish())
}

/// Accumulates fields while the grammar is evaluated.
#[derive(Default)]
struct MapBuilder {
    tileset_name: String,
    background_name: String,
    background_music_name: String,
    tiles: BTreeMap<(usize, usize), Tile>,
    enemies: BTreeMap<(i32, i32), i32>,
    enemy_set: i32,
    items: BTreeMap<(i32, i32), i32>,
    moving_tiles: BTreeMap<(i32, i32), i32>,
    bubble_key: [i32; 3],
    key: [i32; 3],
    chest: [i32; 3],
    doors: BTreeMap<usize, Door>,
    jump_reduction: i32,
    inertia: i32,
    time: i32,
}

impl MapBuilder {
    fn apply(&mut self, step: Step, cursor: &mut Cursor<'_>) -> Result<(), AskmError> {
        match step {
            Step::Skip { bytes, label } => cursor.skip(bytes, label)?,

            Step::Text { field, terminator } => {
                let length = cursor.read_len(field.length_name())?;
                let text = cursor.read_string(length, field.name())?;
                cursor.skip(terminator, field.name())?;
                *self.text_mut(field) = text;
            }

            Step::Grid {
                rows,
                columns,
                row_padding,
            } => {
                for row in 0..rows {
                    for column in 0..columns {
                        let [appearance_id, property_id] = cursor.read_ints::<2>("tiles")?;
                        self.tiles.insert(
                            (row, column),
                            Tile {
                                appearance_id,
                                property_id,
                            },
                        );
                    }
                    cursor.skip(row_padding, "tiles row padding")?;
                }
                debug!("{} tiles read", self.tiles.len());
            }

            Step::Records { field, layout } => {
                let count = cursor.read_len(field.count_name())?;
                for _ in 0..count {
                    let (column, row, id) = layout.split(cursor.read_ints::<3>(field.name())?);
                    let (target, position) = match field {
                        Records::Enemies => (&mut self.enemies, (row, column)),
                        Records::Items => (&mut self.items, (column, row)),
                        Records::MovingTiles => (&mut self.moving_tiles, (column, row)),
                    };
                    if target.insert(position, id).is_some() {
                        warn!(
                            "duplicate {} record at (column {column}, row {row}), keeping the later one",
                            field.name()
                        );
                    }
                }
                debug!("{} {} read", count, field.name());
            }

            Step::Scalar(field) => {
                let value = cursor.read_int(field.name())?;
                *self.scalar_mut(field) = value;
            }

            Step::Special { field, flag } => {
                // presence flag, meaning unknown
                cursor.skip(flag, field.flag_name())?;
                *self.special_mut(field) = cursor.read_ints::<3>(field.name())?;
            }

            Step::Doors { slots } => {
                for slot in 0..slots {
                    let [door_id, target_door_id] = cursor.read_ints::<2>("doors")?;
                    self.doors.insert(
                        slot,
                        Door {
                            door_id,
                            target_door_id,
                        },
                    );
                }
            }
        }
        Ok(())
    }

    fn text_mut(&mut self, field: Text) -> &mut String {
        match field {
            Text::Tileset => &mut self.tileset_name,
            Text::Background => &mut self.background_name,
            Text::BackgroundMusic => &mut self.background_music_name,
        }
    }

    fn scalar_mut(&mut self, field: Scalar) -> &mut i32 {
        match field {
            Scalar::EnemySet => &mut self.enemy_set,
            Scalar::JumpReduction => &mut self.jump_reduction,
            Scalar::Inertia => &mut self.inertia,
            Scalar::Time => &mut self.time,
        }
    }

    fn special_mut(&mut self, field: Special) -> &mut [i32; 3] {
        match field {
            Special::BubbleKey => &mut self.bubble_key,
            Special::Key => &mut self.key,
            Special::Chest => &mut self.chest,
        }
    }

    fn finish(self) -> DecodedMap {
        DecodedMap {
            tileset_name: self.tileset_name,
            background_name: self.background_name,
            background_music_name: self.background_music_name,
            tiles: self.tiles,
            enemies: self.enemies,
            enemy_set: self.enemy_set,
            items: self.items,
            moving_tiles: self.moving_tiles,
            bubble_key: self.bubble_key,
            key: self.key,
            chest: self.chest,
            doors: self.doors,
            jump_reduction: self.jump_reduction,
            inertia: self.inertia,
            time: self.time,
        }
    }
}
