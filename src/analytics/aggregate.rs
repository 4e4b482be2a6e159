//! Grouped aggregation primitives.
//!
//! Every report collapses joined facts through these reducers before any
//! windowing or segmentation runs. Ordering of the output is NOT defined
//! here — assemblers sort downstream with a documented total order.
//!
//! All division is safe against zero denominators and produces `None`
//! (rendered as JSON `null`) rather than NaN / Infinity.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Accumulated sum and count for one group key.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GroupAgg {
    pub sum: f64,
    pub count: u64,
}

impl GroupAgg {
    /// Fold one value into the group.
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Average of the group, `None` when the group is empty.
    ///
    /// Grouping over an inner-join chain only ever emits keys with at least
    /// one record, so `None` is unreachable from the reducers below; the
    /// guard exists so the average can never silently become zero or NaN.
    pub fn avg(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Group `(key, value)` pairs into per-key sum/count aggregates.
pub fn group_agg<K, I>(items: I) -> FxHashMap<K, GroupAgg>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: FxHashMap<K, GroupAgg> = FxHashMap::default();
    for (key, value) in items {
        groups.entry(key).or_default().add(value);
    }
    groups
}

/// Grand total over all values, independent of any grouping pass.
///
/// Percentage-of-total fields divide a group's sum by this, never by a sum
/// of the grouped output, so the two passes stay independent.
pub fn grand_total<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().sum()
}

/// Round to 2 decimal places using standard half-up rounding.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Safe division returning `None` when the denominator is zero.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Percentage of an independently computed grand total, rounded to 2
/// decimals. `None` when the total is zero.
pub fn pct_of_total(part: f64, total: f64) -> Option<f64> {
    safe_div(part, total).map(|ratio| round2(ratio * 100.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
