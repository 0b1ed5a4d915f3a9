//! The ASKM layout as a flat table of steps.
//!
//! Offsets are exact byte counts; the table is evaluated top to bottom by
//! [`super::decode_askm`] and nothing is inferred from the data except the
//! string lengths and record counts the format itself prefixes.

use crate::model::{DOOR_SLOTS, GRID_COLUMNS, GRID_ROWS};
use crate::parser::cursor::WORD;

/// Strings are followed by a single NUL byte that is not part of the length.
pub const NUL: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Tileset,
    Background,
    BackgroundMusic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    EnemySet,
    JumpReduction,
    Inertia,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    BubbleKey,
    Key,
    Chest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Records {
    Enemies,
    Items,
    MovingTiles,
}

/// Word order of one sparse record on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    ColumnRowId,
    RowColumnId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Skip {
        bytes: usize,
        label: &'static str,
    },
    /// Length word, `length` bytes of UTF-8, then `terminator` bytes.
    Text { field: Text, terminator: usize },
    /// `rows` × `columns` pairs of words, `row_padding` bytes after each row.
    Grid {
        rows: usize,
        columns: usize,
        row_padding: usize,
    },
    /// Count word followed by that many three-word records.
    Records { field: Records, layout: Layout },
    Scalar(Scalar),
    /// A discarded presence flag of `flag` bytes, then three words.
    Special { field: Special, flag: usize },
    /// `slots` pairs of `(door_id, target_door_id)`.
    Doors { slots: usize },
}

pub const ASKM_GRAMMAR: &[Step] = &[
    Step::Skip {
        bytes: WORD,
        label: "format marker",
    },
    Step::Text {
        field: Text::Tileset,
        terminator: NUL,
    },
    Step::Text {
        field: Text::Background,
        terminator: NUL,
    },
    Step::Text {
        field: Text::BackgroundMusic,
        terminator: NUL,
    },
    Step::Grid {
        rows: GRID_ROWS,
        columns: GRID_COLUMNS,
        row_padding: 2 * WORD,
    },
    Step::Skip {
        bytes: 256 * WORD,
        label: "reserved block after tiles",
    },
    Step::Records {
        field: Records::Enemies,
        layout: Layout::ColumnRowId,
    },
    Step::Scalar(Scalar::EnemySet),
    Step::Records {
        field: Records::Items,
        layout: Layout::ColumnRowId,
    },
    Step::Special {
        field: Special::BubbleKey,
        flag: WORD,
    },
    Step::Special {
        field: Special::Key,
        flag: WORD,
    },
    Step::Special {
        field: Special::Chest,
        flag: WORD,
    },
    // 8 words here; some historical variants use 2 words, unconfirmed.
    Step::Skip {
        bytes: 8 * WORD,
        label: "reserved block after chest",
    },
    Step::Records {
        field: Records::MovingTiles,
        layout: Layout::RowColumnId,
    },
    Step::Scalar(Scalar::JumpReduction),
    Step::Skip {
        bytes: 3 * WORD,
        label: "padding after jump_reduction",
    },
    Step::Scalar(Scalar::Inertia),
    Step::Skip {
        bytes: 2 * WORD,
        label: "padding after inertia",
    },
    Step::Doors { slots: DOOR_SLOTS },
    Step::Skip {
        bytes: WORD,
        label: "padding after doors",
    },
    Step::Scalar(Scalar::Time),
];

impl Text {
    pub fn name(self) -> &'static str {
        match self {
            Text::Tileset => "tileset_name",
            Text::Background => "background_name",
            Text::BackgroundMusic => "background_music_name",
        }
    }

    pub fn length_name(self) -> &'static str {
        match self {
            Text::Tileset => "tileset_name length",
            Text::Background => "background_name length",
            Text::BackgroundMusic => "background_music_name length",
        }
    }
}

impl Scalar {
    pub fn name(self) -> &'static str {
        match self {
            Scalar::EnemySet => "enemy_set",
            Scalar::JumpReduction => "jump_reduction",
            Scalar::Inertia => "inertia",
            Scalar::Time => "time",
        }
    }
}

impl Special {
    pub fn name(self) -> &'static str {
        match self {
            Special::BubbleKey => "bubble_key",
            Special::Key => "key",
            Special::Chest => "chest",
        }
    }

    pub fn flag_name(self) -> &'static str {
        match self {
            Special::BubbleKey => "bubble_key flag",
            Special::Key => "key flag",
            Special::Chest => "chest flag",
        }
    }
}

impl Records {
    pub fn name(self) -> &'static str {
        match self {
            Records::Enemies => "enemies",
            Records::Items => "items",
            Records::MovingTiles => "moving_tiles",
        }
    }

    pub fn count_name(self) -> &'static str {
        match self {
            Records::Enemies => "enemy_count",
            Records::Items => "item_count",
            Records::MovingTiles => "moving_count",
        }
    }
}

impl Layout {
    /// Split a raw record into `(column, row, id)`.
    pub fn split(self, [a, b, id]: [i32; 3]) -> (i32, i32, i32) {
        match self {
            Layout::ColumnRowId => (a, b, id),
            Layout::RowColumnId => (b, a, id),
        }
    }
}

impl Step {
    /// Bytes this step occupies when every string is empty and every
    /// count is zero.
    pub fn min_bytes(&self) -> usize {
        match *self {
            Step::Skip { bytes, .. } => bytes,
            Step::Text { terminator, .. } => WORD + terminator,
            Step::Grid {
                rows,
                columns,
                row_padding,
            } => rows * (columns * 2 * WORD + row_padding),
            Step::Records { .. } | Step::Scalar(_) => WORD,
            Step::Special { flag, .. } => flag + 3 * WORD,
            Step::Doors { slots } => slots * 2 * WORD,
        }
    }
}

/// Size of the smallest well-formed ASKM file.
pub fn min_file_len() -> usize {
    ASKM_GRAMMAR.iter().map(Step::min_bytes).sum()
}
