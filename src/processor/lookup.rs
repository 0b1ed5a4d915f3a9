//! Lookup tables the projector translates ids through.

use std::collections::BTreeMap;

use crate::tilemap::{Gid, Tileset};

/// Tileset-local index → global tile id.
pub trait GidLookup {
    fn gid(&self, local: i64) -> Option<Gid>;
}

impl GidLookup for Tileset {
    fn gid(&self, local: i64) -> Option<Gid> {
        Tileset::gid(self, local)
    }
}

impl GidLookup for BTreeMap<i64, Gid> {
    fn gid(&self, local: i64) -> Option<Gid> {
        self.get(&local).copied()
    }
}

/// Raw ASKM property code → index into the property tileset.
///
/// Finite table plus an explicit default for every code it does not list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCodes {
    pub codes: BTreeMap<i32, i64>,
    pub default: i64,
}

/// The one raw code with a non-default property tile.
pub const OVERRIDE_CODE: i32 = 120;
pub const OVERRIDE_INDEX: i64 = 17;

impl Default for PropertyCodes {
    fn default() -> Self {
        Self {
            codes: BTreeMap::from([(OVERRIDE_CODE, OVERRIDE_INDEX)]),
            default: 0,
        }
    }
}

impl PropertyCodes {
    pub fn translate(&self, code: i32) -> i64 {
        self.codes.get(&code).copied().unwrap_or(self.default)
    }
}
