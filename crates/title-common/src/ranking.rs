use std::cmp::Ordering;
use std::io::{self, Write};

use crate::types::{FrequencyTable, RankedEntry};

/// Sort the table by count descending, then token ascending (byte order).
///
/// An empty or all-zero table yields no entries.
pub fn rank(table: &FrequencyTable) -> Vec<RankedEntry> {
    let total = table.total();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(token, count)| RankedEntry {
            token: token.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();
    entries.sort_by(compare_entries);
    entries
}

/// Ordering used by [`rank`].
pub fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.token.as_bytes().cmp(b.token.as_bytes()))
}

/// `count` as a percentage of `total`. `total` must be non-zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    100.0 * (count as f64 / total as f64)
}

/// One `token\tcount\tpercentage` line per entry, in the given order.
pub fn write_report<W: Write>(entries: &[RankedEntry], mut out: W) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}
