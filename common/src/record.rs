use serde::Deserialize;

/// One row of the canvas history log.
///
/// Rows carry more columns than this (notably a hashed user id); only the
/// fields the scan consumes are named, the rest are ignored by the reader.
/// A record lives for the duration of one loop iteration and is never
/// retained after aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementRecord {
    pub timestamp: String,
    pub coordinate: String,
    pub pixel_color: String,
}
