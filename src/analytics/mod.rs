//! Analytics computation core.
//!
//! Turns the normalized transactional records into the eleven derived
//! report tables, layer by layer:
//!
//! - [`aggregate`] — grouped sum/count/avg reducers and safe ratios
//! - [`window`] — moving average, rank, tile, cumulative sum
//! - [`segment`] — threshold/tier classification rules
//! - [`reports`] — one assembler per report, composing the layers above
//! - [`types`] — report names, row structs, error type

pub mod aggregate;
pub mod reports;
pub mod segment;
pub mod types;
pub mod window;

// Re-export the most commonly used items at the crate::analytics level.
pub use reports::{build_rows, run_report};
pub use segment::{FilmTier, ParetoBand, SpendTier, ValueTier};
pub use types::{AnalyticsError, AnalyticsResult, Report};
