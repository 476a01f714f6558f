/// Canvas width of the 2022 dataset. Packed coordinate indices decode
/// against this; it is an external assumption, not derived from the data.
pub const CANVAS_WIDTH: u32 = 2000;

/// Length of the `YYYY-MM-DD HH` prefix of a record timestamp.
pub const HOUR_PREFIX_LEN: usize = 13;

/// Emit a progress event every this many rows, counted over all rows
/// processed, matched or not.
pub const PROGRESS_ROW_INTERVAL: u64 = 5_000_000;

pub const DEFAULT_DATA_FILE: &str = "2022_place_canvas_history.csv";

/// Report the top this-many entries per dimension.
pub const TOP_K: usize = 3;
