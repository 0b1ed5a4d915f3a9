use std::str::Utf8Error;

use thiserror::Error;

/// Failures raised while walking the ASKM grammar.
///
/// Decoding is all-or-nothing: any of these aborts the whole map.
#[derive(Debug, Error)]
pub enum AskmError {
    #[error(
        "truncated input reading `{field}` at byte {offset}: needed {needed} bytes, {remaining} left"
    )]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("`{field}` at byte {offset} is not valid UTF-8: {source}")]
    InvalidEncoding {
        field: &'static str,
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("`{field}` at byte {offset} holds negative length {value}")]
    NegativeLength {
        field: &'static str,
        offset: usize,
        value: i32,
    },
}

/// Failures raised while projecting a decoded map onto tile layers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("{table} table has no entry for local index {index}")]
    LookupMiss { table: &'static str, index: i64 },

    #[error("position ({x}, {y}) lies outside layer `{layer}`")]
    OutOfBounds { layer: String, x: i64, y: i64 },

    #[error("tileset `{tileset}` does not fit in the global tile id range")]
    GidOverflow { tileset: String },

    #[error("map has no layer named `{0}`")]
    MissingLayer(String),
}
