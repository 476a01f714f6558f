use std::fmt;

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

use common::TimeWindow;

use crate::aggregate::TopEntry;
use crate::scan::{ScanOutcome, ScanResults};

/// Final report for one analysis run: the echoed timeframe, scan
/// statistics, and (when anything matched) the aggregates.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub timeframe: String,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

impl ScanReport {
    #[must_use]
    pub fn new(window: &TimeWindow, outcome: ScanOutcome) -> Self {
        Self {
            timeframe: window.to_string(),
            outcome,
        }
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Final Results ---")?;
        writeln!(f, "Timeframe: {}", self.timeframe)?;
        writeln!(f, "Execution Time: {} ms", self.outcome.stats.elapsed_ms)?;
        writeln!(
            f,
            "Total Rows Scanned: {}",
            self.outcome.stats.total_rows_processed
        )?;
        writeln!(f, "Rows Matched: {}", self.outcome.stats.rows_matched)?;

        match &self.outcome.results {
            Some(results) => write_results(f, results),
            None => write!(f, "No data found. Ensure your dates are within the data."),
        }
    }
}

fn write_results(f: &mut fmt::Formatter<'_>, results: &ScanResults) -> fmt::Result {
    if let Some(color) = results.top_colors.first() {
        writeln!(f, "Most Placed Color: {}", color.key)?;
    }
    writeln!(
        f,
        "Most Placed Pixel Location: {}",
        results.most_placed_pixel
    )?;
    writeln!(f, "Top 3 Colors:")?;
    writeln!(f, "{}", top_table("Color", &results.top_colors))?;
    writeln!(f, "Top 3 Raw Indices:")?;
    write!(f, "{}", top_table("Index", &results.top_coordinates))
}

fn top_table(label: &str, entries: &[TopEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![label, "Count"]);

    for entry in entries {
        table.add_row(vec![Cell::new(&entry.key), Cell::new(entry.count)]);
    }

    table
}
