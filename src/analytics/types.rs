//! Shared types for the analytics library.
//!
//! Row structs mirror the columns of the materialized report tables; each
//! report's assembler serializes them in final order before handing the
//! rows to the sink.

use serde::Serialize;
use thiserror::Error;

use super::segment::{FilmTier, ParetoBand, SpendTier, ValueTier};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Analytics-specific error.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Tile assignment was configured with zero buckets. Reported before any
    /// computation proceeds; no partial output is written.
    #[error("invalid tile count {0} — bucket count must be at least 1")]
    InvalidTileCount(usize),

    /// The invocation surface was given a report name that does not exist.
    #[error("unknown report '{0}' — run 'renta list' for the available names")]
    UnknownReport(String),

    /// Reading the dataset file failed.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing the dataset file failed.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The sink could not publish a finished table.
    #[error("sink error for report '{report}': {message}")]
    Sink { report: String, message: String },
}

/// Convenience alias.
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

// ---------------------------------------------------------------------------
// Report names
// ---------------------------------------------------------------------------

/// The eleven materialized reports, each independently triggerable by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    KpiOverall,
    KpiRevenueByStore,
    MonthlyRevenueTrend,
    CategoryRevenueShare,
    FilmPerformanceTiers,
    TopCustomers,
    CustomerSpendTiers,
    CustomerValueTiles,
    FilmRevenuePareto,
    FilmRentalDurations,
    FilmRentalRank,
}

impl Report {
    /// Every report, in canonical listing order.
    pub const ALL: [Report; 11] = [
        Report::KpiOverall,
        Report::KpiRevenueByStore,
        Report::MonthlyRevenueTrend,
        Report::CategoryRevenueShare,
        Report::FilmPerformanceTiers,
        Report::TopCustomers,
        Report::CustomerSpendTiers,
        Report::CustomerValueTiles,
        Report::FilmRevenuePareto,
        Report::FilmRentalDurations,
        Report::FilmRentalRank,
    ];

    /// The sink table name this report replaces on every run.
    pub fn table_name(&self) -> &'static str {
        match self {
            Report::KpiOverall => "kpi_overall",
            Report::KpiRevenueByStore => "kpi_revenue_by_store",
            Report::MonthlyRevenueTrend => "monthly_revenue_trend",
            Report::CategoryRevenueShare => "category_revenue_share",
            Report::FilmPerformanceTiers => "film_performance_tiers",
            Report::TopCustomers => "top_customers",
            Report::CustomerSpendTiers => "customer_spend_tiers",
            Report::CustomerValueTiles => "customer_value_tiles",
            Report::FilmRevenuePareto => "film_revenue_pareto",
            Report::FilmRentalDurations => "film_rental_durations",
            Report::FilmRentalRank => "film_rental_rank",
        }
    }

    /// Resolve a report from its table name.
    pub fn from_name(name: &str) -> Option<Report> {
        Report::ALL.iter().copied().find(|r| r.table_name() == name)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

// ---------------------------------------------------------------------------
// Report rows
// ---------------------------------------------------------------------------

/// Single-row whole-business KPI snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct KpiOverallRow {
    pub total_revenue: f64,
    pub total_transactions: u64,
    /// `None` (JSON null) when there are no transactions at all.
    pub avg_transaction: Option<f64>,
}

/// Per-store revenue KPI row.
#[derive(Debug, Clone, Serialize)]
pub struct StoreRevenueRow {
    pub store_id: u32,
    pub store_revenue: f64,
    pub total_transactions: u64,
    pub avg_payment_per_store: Option<f64>,
}

/// One calendar month of revenue with its two-period trailing average.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendRow {
    /// `YYYY-MM` key, ascending.
    pub month: String,
    pub revenue: f64,
    pub moving_avg_revenue: f64,
}

/// Category revenue with its share of the grand total.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShareRow {
    pub category: String,
    pub total_revenue: f64,
    /// Percentage of the independently computed grand total, 2 decimals.
    pub revenue_percentage: Option<f64>,
}

/// Film revenue/rental volume with its performance tier.
#[derive(Debug, Clone, Serialize)]
pub struct FilmTierRow {
    pub film_id: u32,
    pub title: String,
    pub total_revenue: f64,
    pub total_rentals: u64,
    pub performance_tier: FilmTier,
}

/// One of the ten highest-spending customers.
#[derive(Debug, Clone, Serialize)]
pub struct TopCustomerRow {
    pub customer_id: u32,
    pub name: String,
    pub total_spend: f64,
    /// Ties share a rank; the following rank skips.
    pub spend_rank: usize,
}

/// Customer classified by the fixed spend cutoffs.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSpendRow {
    pub customer_id: u32,
    pub name: String,
    pub total_spend: f64,
    pub spend_tier: SpendTier,
}

/// Customer classified by spend tile (NTILE over all customers).
#[derive(Debug, Clone, Serialize)]
pub struct CustomerTileRow {
    pub customer_id: u32,
    pub name: String,
    pub total_spend: f64,
    /// 1-based tile; tile 1 holds the highest spenders.
    pub tile: usize,
    pub value_tier: ValueTier,
}

/// Film revenue row in the Pareto concentration analysis.
#[derive(Debug, Clone, Serialize)]
pub struct FilmParetoRow {
    pub film_id: u32,
    pub title: String,
    pub total_revenue: f64,
    /// Inclusive running sum in revenue-descending order.
    pub cumulative_revenue: f64,
    pub pareto_class: ParetoBand,
}

/// Average rental duration per film, over returned rentals only.
#[derive(Debug, Clone, Serialize)]
pub struct FilmDurationRow {
    pub film_id: u32,
    pub title: String,
    pub rentals_returned: u64,
    pub avg_rental_days: Option<f64>,
}

/// Film ranked by rental volume.
#[derive(Debug, Clone, Serialize)]
pub struct FilmRankRow {
    pub film_id: u32,
    pub title: String,
    pub total_rentals: u64,
    pub rental_rank: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
