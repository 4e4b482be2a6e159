//! Threshold and tile classification rules.
//!
//! Each rule is a total function over its numeric inputs: every input maps
//! to exactly one label, with no error cases. Branches are evaluated top to
//! bottom and the first match wins. All threshold comparisons are strict
//! `>` — a film with exactly 3000.00 of revenue is Regular, and a customer
//! with exactly 1000.00 of spend is Medium.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Film performance tier
// ---------------------------------------------------------------------------

/// Film performance classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FilmTier {
    Blockbuster,
    Hit,
    Regular,
}

impl std::fmt::Display for FilmTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blockbuster => write!(f, "Blockbuster"),
            Self::Hit => write!(f, "Hit"),
            Self::Regular => write!(f, "Regular"),
        }
    }
}

/// Classify a film from its lifetime revenue and rental volume.
pub fn film_tier(total_revenue: f64, total_rentals: u64) -> FilmTier {
    if total_revenue > 5000.0 && total_rentals > 100 {
        FilmTier::Blockbuster
    } else if total_revenue > 3000.0 {
        FilmTier::Hit
    } else {
        FilmTier::Regular
    }
}

// ---------------------------------------------------------------------------
// Customer spend tier (fixed cutoffs)
// ---------------------------------------------------------------------------

/// Customer classification by fixed spend cutoffs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SpendTier {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for SpendTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Classify a customer by total spend: > 1000 High, > 500 Medium, else Low.
pub fn spend_tier(total_spend: f64) -> SpendTier {
    if total_spend > 1000.0 {
        SpendTier::High
    } else if total_spend > 500.0 {
        SpendTier::Medium
    } else {
        SpendTier::Low
    }
}

// ---------------------------------------------------------------------------
// Customer value tier (tile-derived)
// ---------------------------------------------------------------------------

/// Customer classification by computed spend tile (N = 3, descending).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ValueTier {
    #[serde(rename = "VIP")]
    Vip,
    Regular,
    Low,
}

impl std::fmt::Display for ValueTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vip => write!(f, "VIP"),
            Self::Regular => write!(f, "Regular"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Map a 1-based tile number to its tier label.
///
/// The tile assignment is computed once and shared by every branch, so a
/// tie at a tile boundary cannot classify inconsistently.
pub fn value_tier(tile: usize) -> ValueTier {
    match tile {
        1 => ValueTier::Vip,
        2 => ValueTier::Regular,
        _ => ValueTier::Low,
    }
}

// ---------------------------------------------------------------------------
// Pareto band
// ---------------------------------------------------------------------------

/// Pareto 80/20 revenue concentration band.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ParetoBand {
    #[serde(rename = "Top 80% Revenue")]
    TopRevenue,
    #[serde(rename = "Long Tail")]
    LongTail,
}

impl std::fmt::Display for ParetoBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopRevenue => write!(f, "Top 80% Revenue"),
            Self::LongTail => write!(f, "Long Tail"),
        }
    }
}

/// Band a row by its inclusive cumulative revenue against the grand total.
///
/// Callers evaluate this over revenue-descending rows, so once the
/// threshold is crossed every following row is Long Tail by monotonicity.
/// The test multiplies rather than divides, so a zero grand total cannot
/// produce a division by zero.
pub fn pareto_band(cumulative_revenue: f64, grand_total_revenue: f64) -> ParetoBand {
    if cumulative_revenue <= 0.8 * grand_total_revenue {
        ParetoBand::TopRevenue
    } else {
        ParetoBand::LongTail
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
