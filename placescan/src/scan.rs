use std::io::Read;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use common::constants::{PROGRESS_ROW_INTERVAL, TOP_K};
use common::{PixelDecodeError, PixelPoint, PlacementRecord, TimeWindow, hour_floor};

use crate::aggregate::{Dimension, FrequencyAggregator, TopEntry};

#[derive(Debug, Serialize)]
pub struct ScanStats {
    pub total_rows_processed: u64,
    pub rows_matched: u64,
    pub elapsed_ms: u128,
}

/// Aggregates computed after the stream is exhausted. Absent when no row
/// matched the window.
#[derive(Debug, Serialize)]
pub struct ScanResults {
    pub top_colors: Vec<TopEntry>,
    pub top_coordinates: Vec<TopEntry>,
    pub most_placed_pixel: PixelPoint,
}

#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    pub stats: ScanStats,
    pub results: Option<ScanResults>,
}

/// Single streaming pass over the record source.
///
/// Every row is read exactly once and evaluated independently; the input
/// is not assumed to be sorted by time, so there is no early exit once
/// the window end has been seen. Rows that fail to deserialize or carry
/// an unparseable timestamp are counted as processed but never matched.
/// Memory is bounded by the number of distinct keys per dimension, not by
/// the row count.
pub fn run_scan<R: Read>(
    mut reader: csv::Reader<R>,
    window: &TimeWindow,
    canvas_width: u32,
) -> Result<ScanOutcome, PixelDecodeError> {
    let started = Instant::now();
    let mut aggregator = FrequencyAggregator::default();
    let mut total_rows_processed: u64 = 0;
    let mut rows_matched: u64 = 0;

    for row in reader.deserialize::<PlacementRecord>() {
        total_rows_processed += 1;
        if total_rows_processed % PROGRESS_ROW_INTERVAL == 0 {
            info!(
                "Progress: {}M rows scanned...",
                total_rows_processed / 1_000_000
            );
        }

        let Ok(record) = row else {
            continue;
        };
        let Ok(instant) = hour_floor(&record.timestamp) else {
            continue;
        };
        if window.contains(instant) {
            rows_matched += 1;
            aggregator.record(Dimension::Color, &record.pixel_color);
            aggregator.record(Dimension::Coordinate, &record.coordinate);
        }
    }

    let stats = ScanStats {
        total_rows_processed,
        rows_matched,
        elapsed_ms: started.elapsed().as_millis(),
    };

    if rows_matched == 0 {
        return Ok(ScanOutcome {
            stats,
            results: None,
        });
    }

    let top_colors = aggregator.top_k(Dimension::Color, TOP_K);
    let top_coordinates = aggregator.top_k(Dimension::Coordinate, TOP_K);
    let Some(top_coordinate) = top_coordinates.first() else {
        return Ok(ScanOutcome {
            stats,
            results: None,
        });
    };
    let most_placed_pixel = PixelPoint::from_packed_index(&top_coordinate.key, canvas_width)?;

    Ok(ScanOutcome {
        stats,
        results: Some(ScanResults {
            top_colors,
            top_coordinates,
            most_placed_pixel,
        }),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const WIDTH: u32 = 2000;

    fn window(start_hour: &str, end_hour: &str) -> TimeWindow {
        TimeWindow::from_hour_args("2022-04-04", start_hour, "2022-04-04", end_hour).unwrap()
    }

    fn scan(data: &str, window: &TimeWindow) -> ScanOutcome {
        let reader = csv::Reader::from_reader(data.as_bytes());
        run_scan(reader, window, WIDTH).unwrap()
    }

    #[test]
    fn test_five_record_scenario() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 00:10:00.000 UTC,u1,#FF0000,100
2022-04-04 00:20:00.000 UTC,u2,#FF0000,100
2022-04-04 00:30:00.000 UTC,u3,#00FF00,200
2022-04-04 02:00:00.000 UTC,u4,#0000FF,300
2022-04-03 23:59:59.000 UTC,u5,#0000FF,300
";
        let outcome = scan(data, &window("00", "01"));
        assert_eq!(outcome.stats.total_rows_processed, 5);
        assert_eq!(outcome.stats.rows_matched, 3);

        let results = outcome.results.unwrap();
        assert_eq!(results.top_colors[0].key, "#FF0000");
        assert_eq!(results.top_colors[0].count, 2);
        assert_eq!(results.top_coordinates[0].key, "100");
        assert_eq!(results.top_coordinates[0].count, 2);
        assert_eq!(results.most_placed_pixel, PixelPoint { x: 100, y: 0 });
    }

    #[test]
    fn test_malformed_rows_processed_but_not_matched() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
garbage,u1,#FF0000,100
2022-04-04 00:10:00.000 UTC,u2,#FF0000,100
\"unclosed,u3,#FF0000,100
";
        let outcome = scan(data, &window("00", "01"));
        assert_eq!(outcome.stats.total_rows_processed, 3);
        assert_eq!(outcome.stats.rows_matched, 1);
        let results = outcome.results.unwrap();
        assert_eq!(results.top_colors.len(), 1);
        assert_eq!(results.top_colors[0].count, 1);
    }

    #[test]
    fn test_zero_matches_yields_no_results() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 05:00:00.000 UTC,u1,#FF0000,100
";
        let outcome = scan(data, &window("00", "01"));
        assert_eq!(outcome.stats.total_rows_processed, 1);
        assert_eq!(outcome.stats.rows_matched, 0);
        assert!(outcome.results.is_none());
    }

    #[test]
    fn test_window_bounds_inclusive_start_exclusive_end() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 00:00:00.000 UTC,u1,#FF0000,100
2022-04-04 01:00:00.000 UTC,u2,#00FF00,200
";
        let outcome = scan(data, &window("00", "01"));
        assert_eq!(outcome.stats.rows_matched, 1);
        let results = outcome.results.unwrap();
        assert_eq!(results.top_colors[0].key, "#FF0000");
    }

    #[test]
    fn test_matched_never_exceeds_processed() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 00:00:00.000 UTC,u1,#FF0000,100
bad,u2,#FF0000,100
2022-04-04 00:30:00.000 UTC,u3,#FF0000,100
";
        let outcome = scan(data, &window("00", "01"));
        assert!(outcome.stats.rows_matched <= outcome.stats.total_rows_processed);
        assert_eq!(outcome.stats.total_rows_processed, 3);
        assert_eq!(outcome.stats.rows_matched, 2);
    }

    #[test]
    fn test_tie_break_follows_source_order() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 00:01:00.000 UTC,u1,#222222,9
2022-04-04 00:02:00.000 UTC,u2,#111111,8
2022-04-04 00:03:00.000 UTC,u3,#222222,9
2022-04-04 00:04:00.000 UTC,u4,#111111,8
";
        let outcome = scan(data, &window("00", "01"));
        let results = outcome.results.unwrap();
        assert_eq!(results.top_colors[0].key, "#222222");
        assert_eq!(results.top_colors[1].key, "#111111");
        assert_eq!(results.top_coordinates[0].key, "9");
    }

    #[test]
    fn test_decode_failure_on_top_coordinate_is_fatal() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 00:01:00.000 UTC,u1,#FF0000,not-a-number
";
        let window = window("00", "01");
        let reader = csv::Reader::from_reader(data.as_bytes());
        let result = run_scan(reader, &window, WIDTH);
        assert!(matches!(result, Err(PixelDecodeError::BadToken(_))));
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let data = "\
timestamp,user_id,pixel_color,coordinate
2022-04-04 00:01:00.000 UTC,u1,#FF0000,5
2022-04-04 00:02:00.000 UTC,u2,#00FF00,6
2022-04-04 00:03:00.000 UTC,u3,#FF0000,6
2022-04-04 00:04:00.000 UTC,u4,#00FF00,5
";
        let window = window("00", "01");
        let first = scan(data, &window);
        let second = scan(data, &window);
        assert_eq!(
            first.stats.rows_matched,
            second.stats.rows_matched
        );
        let (a, b) = (first.results.unwrap(), second.results.unwrap());
        assert_eq!(a.top_colors, b.top_colors);
        assert_eq!(a.top_coordinates, b.top_coordinates);
        assert_eq!(a.most_placed_pixel, b.most_placed_pixel);
    }
}
