//! Output formats for a projected map.
pub mod tiled;
