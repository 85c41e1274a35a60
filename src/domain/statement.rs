//! Financial-statement tables and label resolution.
//!
//! Data providers rename statement line items between filing periods and
//! across accounting standards, so every lookup goes through an ordered
//! list of candidate labels rather than a single canonical key.

use std::collections::BTreeMap;

/// One financial statement for one entity: line-item label mapped to a
/// numeric series ordered most-recent-first. Entries may be absent, zero,
/// or NaN; the resolver treats all three as "no value".
#[derive(Debug, Clone, Default)]
pub struct StatementTable {
    rows: BTreeMap<String, Vec<f64>>,
}

impl StatementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, values: Vec<f64>) {
        self.rows.insert(label.to_string(), values);
    }

    pub fn row(&self, label: &str) -> Option<&[f64]> {
        self.rows.get(label).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Try each candidate label in order; for a matched label, scan its values
/// from most recent to oldest and return the first that is finite and
/// non-zero. Absence of data is expressible only as `0.0` — a reported
/// zero and a missing line item are deliberately indistinguishable.
pub fn resolve(table: &StatementTable, candidates: &[&str]) -> f64 {
    for label in candidates {
        if let Some(values) = table.row(label) {
            for &v in values {
                if v.is_finite() && v != 0.0 {
                    return v;
                }
            }
        }
    }
    0.0
}

/// Return the full series for the first candidate label present in the
/// table, NaN entries retained. Empty when no label matches.
pub fn resolve_series(table: &StatementTable, candidates: &[&str]) -> Vec<f64> {
    for label in candidates {
        if let Some(values) = table.row(label) {
            return values.to_vec();
        }
    }
    Vec::new()
}
