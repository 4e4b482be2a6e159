//! Ordered-partition window operations.
//!
//! Every function here assumes its input is already sorted by the report's
//! documented order key; the assemblers own the sort. An empty input yields
//! an empty output for all operations, never an error.

use super::aggregate::round2;
use super::types::{AnalyticsError, AnalyticsResult};

/// Trailing-inclusive moving average.
///
/// Element `i` averages `values[max(0, i + 1 - window)..=i]`, so the first
/// element's moving average equals itself. Output is rounded to 2 decimals.
/// A window of zero behaves as a window of one.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        let avg = slice.iter().sum::<f64>() / slice.len() as f64;
        out.push(round2(avg));
    }
    out
}

/// Rank assignment over a value sequence sorted descending.
///
/// Ties share a rank and the following rank skips past them (SQL `RANK`):
/// `[100, 100, 90]` → `[1, 1, 3]`. Rank 1 is the largest value.
pub fn rank_desc(sorted_desc: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_desc.len());
    for (i, value) in sorted_desc.iter().enumerate() {
        if i > 0 && *value == sorted_desc[i - 1] {
            ranks.push(ranks[i - 1]);
        } else {
            ranks.push(i + 1);
        }
    }
    ranks
}

/// 1-based tile assignment for `len` elements split into `buckets` buckets.
///
/// Buckets are as equal as possible; when `len` is not evenly divisible,
/// earlier buckets absorb the extra elements. Tile 1 holds the highest
/// values when the sequence is sorted descending. `buckets == 0` is a
/// configuration error reported before any computation.
pub fn ntile(len: usize, buckets: usize) -> AnalyticsResult<Vec<usize>> {
    if buckets == 0 {
        return Err(AnalyticsError::InvalidTileCount(buckets));
    }
    let base = len / buckets;
    let remainder = len % buckets;

    let mut tiles = Vec::with_capacity(len);
    for bucket in 1..=buckets {
        let size = base + usize::from(bucket <= remainder);
        tiles.extend(std::iter::repeat_n(bucket, size));
    }
    debug_assert_eq!(tiles.len(), len);
    Ok(tiles)
}

/// Inclusive running cumulative sum over an already-sorted sequence.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut running = 0.0;
    values
        .iter()
        .map(|v| {
            running += v;
            running
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
