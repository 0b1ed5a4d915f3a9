use std::fs;
use std::path::{Path, PathBuf};

use askm_tiled::config::Config;
use askm_tiled::error::AskmError;
use askm_tiled::model::{GRID_CELLS, GRID_COLUMNS, GRID_ROWS};
use askm_tiled::parser::{decode_askm, load_askm};
use askm_tiled::processor;
use askm_tiled::writer::tiled;
use serde_json::Value;

/// Hand-assembled ASKM file: terrain id = column, property 120 on row 0,
/// one enemy, two items, one moving tile.
fn askm_bytes() -> Vec<u8> {
    let mut b = Vec::new();
    let int = |b: &mut Vec<u8>, v: i32| b.extend_from_slice(&v.to_le_bytes());
    let text = |b: &mut Vec<u8>, s: &str| {
        b.extend_from_slice(&(s.len() as i32).to_le_bytes());
        b.extend_from_slice(s.as_bytes());
        b.push(0);
    };

    int(&mut b, 0);
    text(&mut b, "cave.png");
    text(&mut b, "cave_bg.png");
    text(&mut b, "cave.ogg");
    for row in 0..GRID_ROWS as i32 {
        for column in 0..GRID_COLUMNS as i32 {
            int(&mut b, column % 10);
            int(&mut b, if row == 0 { 120 } else { 0 });
        }
        b.extend_from_slice(&[0; 8]);
    }
    b.extend_from_slice(&[0; 1024]);
    for v in [1, 10, 20, 4] {
        int(&mut b, v); // enemy count, column, row, id
    }
    int(&mut b, 2); // enemy_set
    for v in [2, 2, 3, 4, 76, 47, 1] {
        int(&mut b, v); // item count, (column, row, id) x2
    }
    for _ in 0..3 {
        for v in [1, 0, 0, 0] {
            int(&mut b, v);
        }
    }
    b.extend_from_slice(&[0; 32]);
    for v in [1, 8, 9, 5] {
        int(&mut b, v); // moving count, row, column, id
    }
    int(&mut b, 3); // jump_reduction
    b.extend_from_slice(&[0; 12]);
    int(&mut b, 9); // inertia
    b.extend_from_slice(&[0; 8]);
    for v in 0..8 {
        int(&mut b, v);
    }
    b.extend_from_slice(&[0; 4]);
    int(&mut b, 120); // time
    b
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("askm-tiled-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_tileset(dir: &Path, file: &str, name: &str, tilecount: u32) {
    let json = format!(
        r#"{{ "name": "{name}", "tilecount": {tilecount}, "columns": 6,
             "tilewidth": 32, "tileheight": 32, "image": "{name}.png" }}"#
    );
    fs::write(dir.join(file), json).unwrap();
}

#[test]
fn decodes_hand_built_map() {
    let map = decode_askm(&askm_bytes()).expect("valid askm");

    assert_eq!(map.tileset_name, "cave.png");
    assert_eq!(map.tiles.len(), GRID_CELLS);
    assert_eq!(map.enemies.len(), 1);
    assert_eq!(map.enemies[&(20, 10)], 4);
    assert_eq!(map.items.len(), 2);
    assert_eq!(map.items[&(76, 47)], 1);
    assert_eq!(map.moving_tiles[&(9, 8)], 5);
    assert_eq!(map.doors.len(), 4);
    assert_eq!(map.time, 120);
}

#[test]
fn truncated_file_is_rejected_whole() {
    let bytes = askm_bytes();
    for cut in [0, 10, 100, bytes.len() / 2, bytes.len() - 4] {
        let err = decode_askm(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, AskmError::Truncated { .. }), "cut {cut}: {err}");
    }
}

#[test]
fn converts_to_tiled_json() {
    let dir = scratch_dir("convert");
    write_tileset(&dir, "cave.tsj", "cave", 10);
    write_tileset(&dir, "properties.tsj", "properties", 24);
    write_tileset(&dir, "pat_item.tsj", "pat_item", 30);

    let input = dir.join("level.map");
    fs::write(&input, askm_bytes()).unwrap();

    let askm = load_askm(&input).expect("load");
    let tmx = processor::run(&askm, &Config::default(), &dir).expect("project");

    let output = dir.join("level.tmj");
    tiled::emit(&tmx, &output).expect("emit");
    let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();

    assert_eq!(json["width"], 78);
    assert_eq!(json["height"], 48);

    let firstgids: Vec<i64> = json["tilesets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["firstgid"].as_i64().unwrap())
        .collect();
    assert_eq!(firstgids, vec![1, 11, 35]);

    let layer = |name: &str| -> Vec<i64> {
        json["layers"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["name"] == name)
            .unwrap()["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_i64().unwrap())
            .collect()
    };
    let at = |x: usize, y: usize| y * 78 + x;

    let tiles = layer("tiles");
    assert_eq!(tiles[at(3, 5)], 1 + 3);
    assert_eq!(tiles[at(77, 0)], 0, "padding column stays empty");

    let properties = layer("properties");
    assert_eq!(properties[at(4, 0)], 11 + 17);
    assert_eq!(properties[at(4, 1)], 11);

    let items = layer("items");
    assert_eq!(items[at(2, 3)], 35 + 4 * 6);
    assert_eq!(items[at(76, 47)], 35 + 6);
    assert_eq!(items.iter().filter(|g| **g != 0).count(), 2);

    let props = json["properties"].as_array().unwrap();
    let prop = |name: &str| {
        props
            .iter()
            .find(|p| p["name"] == name)
            .map(|p| p["value"].clone())
    };
    assert_eq!(prop("jump_reduction"), Some(Value::from("3")));
    assert_eq!(prop("inertia"), Some(Value::from("9")));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_item_icon_fails_projection() {
    let dir = scratch_dir("miss");
    write_tileset(&dir, "cave.tsj", "cave", 10);
    write_tileset(&dir, "properties.tsj", "properties", 24);
    // item 4 needs local index 24
    write_tileset(&dir, "pat_item.tsj", "pat_item", 20);

    let askm = decode_askm(&askm_bytes()).unwrap();
    let err = processor::run(&askm, &Config::default(), &dir).unwrap_err();
    assert!(
        format!("{err:#}").contains("item icon table has no entry for local index 24"),
        "got: {err:#}"
    );

    fs::remove_dir_all(&dir).ok();
}
