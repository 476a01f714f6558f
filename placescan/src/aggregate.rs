use indexmap::IndexMap;
use serde::Serialize;

/// One of the two independent attributes counted during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Color,
    Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEntry {
    pub key: String,
    pub count: u64,
}

/// Frequency table that remembers the order in which distinct keys were
/// first seen. That order is the tie-break for [`FrequencyTable::top_k`],
/// so repeated runs over the same source produce identical output.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn record(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
        } else {
            self.counts.insert(key.to_string(), 1);
        }
    }

    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Top `k` entries, strictly descending by count. Entries with equal
    /// counts keep first-encounter order (stable sort over insertion
    /// order).
    #[must_use]
    pub fn top_k(&self, k: usize) -> Vec<TopEntry> {
        let mut entries: Vec<TopEntry> = self
            .counts
            .iter()
            .map(|(key, count)| TopEntry {
                key: key.clone(),
                count: *count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(k);
        entries
    }
}

/// Owns the per-dimension frequency tables for the lifetime of one scan.
#[derive(Debug, Default)]
pub struct FrequencyAggregator {
    colors: FrequencyTable,
    coordinates: FrequencyTable,
}

impl FrequencyAggregator {
    pub fn record(&mut self, dimension: Dimension, key: &str) {
        self.table_mut(dimension).record(key);
    }

    #[must_use]
    pub fn top_k(&self, dimension: Dimension, k: usize) -> Vec<TopEntry> {
        self.table(dimension).top_k(k)
    }

    #[must_use]
    pub fn distinct(&self, dimension: Dimension) -> usize {
        self.table(dimension).distinct()
    }

    const fn table(&self, dimension: Dimension) -> &FrequencyTable {
        match dimension {
            Dimension::Color => &self.colors,
            Dimension::Coordinate => &self.coordinates,
        }
    }

    const fn table_mut(&mut self, dimension: Dimension) -> &mut FrequencyTable {
        match dimension {
            Dimension::Color => &mut self.colors,
            Dimension::Coordinate => &mut self.coordinates,
        }
    }
}
