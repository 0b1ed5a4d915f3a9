//! Emit a projected map as a Tiled JSON (`.tmj`) document.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::tilemap::{Gid, TileMap};

#[derive(Serialize)]
struct MapDoc<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    version: &'static str,
    orientation: &'static str,
    renderorder: &'static str,
    infinite: bool,
    width: usize,
    height: usize,
    tilewidth: u32,
    tileheight: u32,
    nextlayerid: usize,
    nextobjectid: usize,
    layers: Vec<LayerDoc<'a>>,
    tilesets: Vec<TilesetRef<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<PropertyDoc<'a>>,
}

#[derive(Serialize)]
struct LayerDoc<'a> {
    id: usize,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    opacity: f32,
    visible: bool,
    data: &'a [Gid],
}

#[derive(Serialize)]
struct TilesetRef<'a> {
    firstgid: Gid,
    source: &'a str,
}

#[derive(Serialize)]
struct PropertyDoc<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

fn document(map: &TileMap) -> MapDoc<'_> {
    let layers: Vec<LayerDoc<'_>> = map
        .layers
        .iter()
        .enumerate()
        .map(|(i, layer)| LayerDoc {
            id: i + 1,
            name: &layer.name,
            kind: "tilelayer",
            width: layer.width,
            height: layer.height,
            x: 0,
            y: 0,
            opacity: 1.0,
            visible: true,
            data: &layer.data,
        })
        .collect();

    MapDoc {
        kind: "map",
        version: "1.10",
        orientation: "orthogonal",
        renderorder: "right-down",
        infinite: false,
        width: map.width,
        height: map.height,
        tilewidth: map.tile_width,
        tileheight: map.tile_height,
        nextlayerid: layers.len() + 1,
        nextobjectid: 1,
        layers,
        tilesets: map
            .tilesets
            .iter()
            .map(|t| TilesetRef {
                firstgid: t.first_gid,
                source: &t.source,
            })
            .collect(),
        properties: map
            .properties
            .iter()
            .map(|(name, value)| PropertyDoc {
                name,
                kind: "string",
                value,
            })
            .collect(),
    }
}

pub fn to_json(map: &TileMap) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&document(map))
}

pub fn emit(map: &TileMap, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &document(map))?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::TilesetDef;
    use serde_json::Value;

    fn small_map() -> TileMap {
        let mut map = TileMap::new(2, 2, 32, 32);
        map.append_tileset(
            TilesetDef {
                name: "terrain".into(),
                tilecount: 4,
            },
            "terrain.tsj",
        )
        .unwrap();
        map.add_layer("tiles");
        map.layer_mut("tiles").unwrap().set(1, 0, 3).unwrap();
        map.set_property("inertia", "7");
        map
    }

    #[test]
    fn test_document_shape() {
        let json: Value = serde_json::from_str(&to_json(&small_map()).unwrap()).unwrap();

        assert_eq!(json["type"], "map");
        assert_eq!(json["width"], 2);
        assert_eq!(json["tilewidth"], 32);
        assert_eq!(json["nextlayerid"], 2);

        let layer = &json["layers"][0];
        assert_eq!(layer["name"], "tiles");
        assert_eq!(layer["type"], "tilelayer");
        assert_eq!(layer["data"], serde_json::json!([0, 3, 0, 0]));

        assert_eq!(json["tilesets"][0]["firstgid"], 1);
        assert_eq!(json["tilesets"][0]["source"], "terrain.tsj");

        assert_eq!(
            json["properties"][0],
            serde_json::json!({ "name": "inertia", "type": "string", "value": "7" })
        );
    }
}
