//! Report assemblers.
//!
//! One function per materialized report. Each assembler walks the same
//! pipeline: select the join chain for its grain, collapse through the
//! aggregation primitives, apply windowing and segmentation where the
//! report calls for them, sort with a deterministic total order, truncate
//! where specified, and emit the ordered rows to the sink.
//!
//! Reports never read each other's outputs — every table is recomputed
//! from the shared source records, and rerunning against unchanged data
//! reproduces byte-identical rows in identical order.

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use crate::model::Dataset;
use crate::sink::ReportSink;

use super::aggregate::{GroupAgg, grand_total, group_agg, pct_of_total, round2};
use super::segment::{film_tier, pareto_band, spend_tier, value_tier};
use super::types::*;
use super::window::{cumulative_sum, moving_average, ntile, rank_desc};

/// Trailing window width for the monthly revenue trend.
const TREND_WINDOW: usize = 2;

/// Bucket count for the customer value tiles.
const VALUE_TILE_BUCKETS: usize = 3;

/// Row cap for the top-customers report.
const TOP_CUSTOMER_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Compute one report and publish it through the sink.
///
/// The row set is fully built before `put` runs, so the sink's replace is
/// all-or-nothing: a failing report leaves its prior table untouched.
pub fn run_report(
    report: Report,
    dataset: &Dataset,
    sink: &mut dyn ReportSink,
) -> AnalyticsResult<()> {
    let rows = build_rows(report, dataset)?;
    tracing::info!(report = %report, rows = rows.len(), "materialized report");
    sink.put(report.table_name(), rows)
}

/// Compute one report's final ordered rows as JSON values.
pub fn build_rows(report: Report, dataset: &Dataset) -> AnalyticsResult<Vec<Value>> {
    match report {
        Report::KpiOverall => to_values(&kpi_overall(dataset)),
        Report::KpiRevenueByStore => to_values(&kpi_revenue_by_store(dataset)),
        Report::MonthlyRevenueTrend => to_values(&monthly_revenue_trend(dataset)),
        Report::CategoryRevenueShare => to_values(&category_revenue_share(dataset)),
        Report::FilmPerformanceTiers => to_values(&film_performance_tiers(dataset)),
        Report::TopCustomers => to_values(&top_customers(dataset)),
        Report::CustomerSpendTiers => to_values(&customer_spend_tiers(dataset)),
        Report::CustomerValueTiles => to_values(&customer_value_tiles(dataset)?),
        Report::FilmRevenuePareto => to_values(&film_revenue_pareto(dataset)),
        Report::FilmRentalDurations => to_values(&film_rental_durations(dataset)),
        Report::FilmRentalRank => to_values(&film_rental_rank(dataset)),
    }
}

fn to_values<T: Serialize>(rows: &[T]) -> AnalyticsResult<Vec<Value>> {
    rows.iter()
        .map(|row| serde_json::to_value(row).map_err(AnalyticsError::Parse))
        .collect()
}

/// Descending by value with an ascending id tie-break, so every sort is a
/// total order and reruns are byte-identical.
fn desc_by_value_then_id(a: &(u32, f64), b: &(u32, f64)) -> std::cmp::Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

// ---------------------------------------------------------------------------
// KPI reports
// ---------------------------------------------------------------------------

/// Whole-business KPI snapshot: one row, or none when there are no payments.
pub fn kpi_overall(dataset: &Dataset) -> Vec<KpiOverallRow> {
    if dataset.payments.is_empty() {
        return Vec::new();
    }
    let mut agg = GroupAgg::default();
    for p in &dataset.payments {
        agg.add(p.amount);
    }
    vec![KpiOverallRow {
        total_revenue: round2(agg.sum),
        total_transactions: agg.count,
        avg_transaction: agg.avg().map(round2),
    }]
}

/// Revenue, transaction count, and average payment per store.
pub fn kpi_revenue_by_store(dataset: &Dataset) -> Vec<StoreRevenueRow> {
    let stores = dataset.store_ids();
    let groups = group_agg(
        dataset
            .payment_facts()
            .into_iter()
            .filter(|f| stores.contains(&f.store_id))
            .map(|f| (f.store_id, f.amount)),
    );

    groups
        .into_iter()
        .sorted_by(|a, b| {
            b.1.sum
                .total_cmp(&a.1.sum)
                .then(a.0.cmp(&b.0))
        })
        .map(|(store_id, agg)| StoreRevenueRow {
            store_id,
            store_revenue: round2(agg.sum),
            total_transactions: agg.count,
            avg_payment_per_store: agg.avg().map(round2),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Trend reports
// ---------------------------------------------------------------------------

/// Monthly revenue with a two-period trailing moving average.
pub fn monthly_revenue_trend(dataset: &Dataset) -> Vec<MonthlyTrendRow> {
    let groups = group_agg(
        dataset
            .payments
            .iter()
            .map(|p| (p.payment_date.format("%Y-%m").to_string(), p.amount)),
    );

    let ordered: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(month, agg)| (month, agg.sum))
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect();

    let revenues: Vec<f64> = ordered.iter().map(|(_, sum)| *sum).collect();
    let trailing = moving_average(&revenues, TREND_WINDOW);

    ordered
        .into_iter()
        .zip(trailing)
        .map(|((month, revenue), moving_avg_revenue)| MonthlyTrendRow {
            month,
            revenue: round2(revenue),
            moving_avg_revenue,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category reports
// ---------------------------------------------------------------------------

/// Revenue per category with its share of the grand total.
///
/// A payment whose film carries several categories contributes once per
/// category, and the grand total is computed over the same fanned-out
/// relation in a separate ungrouped pass, so the shares sum to 100%.
pub fn category_revenue_share(dataset: &Dataset) -> Vec<CategoryShareRow> {
    let categories = dataset.categories_of_film();

    let fanned: Vec<(String, f64)> = dataset
        .payment_facts()
        .iter()
        .flat_map(|fact| {
            categories
                .get(&fact.film_id)
                .into_iter()
                .flatten()
                .map(|name| (name.to_string(), fact.amount))
        })
        .collect();

    let total = grand_total(fanned.iter().map(|(_, amount)| *amount));
    let groups = group_agg(fanned);

    groups
        .into_iter()
        .sorted_by(|a, b| b.1.sum.total_cmp(&a.1.sum).then(a.0.cmp(&b.0)))
        .map(|(category, agg)| CategoryShareRow {
            category,
            total_revenue: round2(agg.sum),
            revenue_percentage: pct_of_total(agg.sum, total),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Film reports
// ---------------------------------------------------------------------------

/// Per-film revenue and rental volume at the payment grain.
fn film_revenue_groups(dataset: &Dataset) -> Vec<(u32, GroupAgg)> {
    let films = dataset.films_by_id();
    let groups = group_agg(
        dataset
            .payment_facts()
            .into_iter()
            .filter(|f| films.contains_key(&f.film_id))
            .map(|f| (f.film_id, f.amount)),
    );
    groups
        .into_iter()
        .sorted_by(|a, b| b.1.sum.total_cmp(&a.1.sum).then(a.0.cmp(&b.0)))
        .collect()
}

/// Film performance tiers: Blockbuster / Hit / Regular.
pub fn film_performance_tiers(dataset: &Dataset) -> Vec<FilmTierRow> {
    let films = dataset.films_by_id();
    film_revenue_groups(dataset)
        .into_iter()
        .map(|(film_id, agg)| FilmTierRow {
            film_id,
            title: films[&film_id].title.clone(),
            total_revenue: round2(agg.sum),
            total_rentals: agg.count,
            performance_tier: film_tier(agg.sum, agg.count),
        })
        .collect()
}

/// Pareto 80/20 revenue concentration across films.
pub fn film_revenue_pareto(dataset: &Dataset) -> Vec<FilmParetoRow> {
    let films = dataset.films_by_id();
    let ordered = film_revenue_groups(dataset);

    // Grand total over the ungrouped amounts, independent of the sort.
    let total = grand_total(
        dataset
            .payment_facts()
            .into_iter()
            .filter(|f| films.contains_key(&f.film_id))
            .map(|f| f.amount),
    );

    let revenues: Vec<f64> = ordered.iter().map(|(_, agg)| agg.sum).collect();
    let running = cumulative_sum(&revenues);

    ordered
        .into_iter()
        .zip(running)
        .map(|((film_id, agg), cumulative)| FilmParetoRow {
            film_id,
            title: films[&film_id].title.clone(),
            total_revenue: round2(agg.sum),
            cumulative_revenue: round2(cumulative),
            pareto_class: pareto_band(cumulative, total),
        })
        .collect()
}

/// Average rental duration per film over returned rentals only.
pub fn film_rental_durations(dataset: &Dataset) -> Vec<FilmDurationRow> {
    let films = dataset.films_by_id();
    let groups = group_agg(dataset.rental_facts().into_iter().filter_map(|f| {
        if !films.contains_key(&f.film_id) {
            return None;
        }
        // Open rentals (no return date) are excluded from duration stats.
        let returned = f.return_date?;
        let days = (returned - f.rental_date).num_seconds() as f64 / 86_400.0;
        Some((f.film_id, days))
    }));

    groups
        .into_iter()
        .map(|(film_id, agg)| (film_id, agg, agg.avg().unwrap_or(0.0)))
        .sorted_by(|a, b| b.2.total_cmp(&a.2).then(a.0.cmp(&b.0)))
        .map(|(film_id, agg, _)| FilmDurationRow {
            film_id,
            title: films[&film_id].title.clone(),
            rentals_returned: agg.count,
            avg_rental_days: agg.avg().map(round2),
        })
        .collect()
}

/// Films ranked by rental volume, ties sharing a rank.
pub fn film_rental_rank(dataset: &Dataset) -> Vec<FilmRankRow> {
    let films = dataset.films_by_id();
    let groups = group_agg(
        dataset
            .rental_facts()
            .into_iter()
            .filter(|f| films.contains_key(&f.film_id))
            .map(|f| (f.film_id, 1.0)),
    );

    let ordered: Vec<(u32, u64)> = groups
        .into_iter()
        .map(|(film_id, agg)| (film_id, agg.count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .collect();

    let counts: Vec<f64> = ordered.iter().map(|(_, count)| *count as f64).collect();
    let ranks = rank_desc(&counts);

    ordered
        .into_iter()
        .zip(ranks)
        .map(|((film_id, total_rentals), rental_rank)| FilmRankRow {
            film_id,
            title: films[&film_id].title.clone(),
            total_rentals,
            rental_rank,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Customer reports
// ---------------------------------------------------------------------------

/// Spend per customer, revenue-descending with an id tie-break.
///
/// Customer reports sit on the customer+rental+payment chain: a payment
/// only counts when both its customer and its rental resolve.
fn customer_spend_groups(dataset: &Dataset) -> Vec<(u32, f64)> {
    let customers = dataset.customers_by_id();
    let rental_ids: rustc_hash::FxHashSet<u32> =
        dataset.rentals.iter().map(|r| r.rental_id).collect();
    let groups = group_agg(
        dataset
            .payments
            .iter()
            .filter(|p| customers.contains_key(&p.customer_id))
            .filter(|p| rental_ids.contains(&p.rental_id))
            .map(|p| (p.customer_id, p.amount)),
    );
    groups
        .into_iter()
        .map(|(customer_id, agg)| (customer_id, agg.sum))
        .sorted_by(desc_by_value_then_id)
        .collect()
}

/// The ten highest-spending customers with their ranks.
///
/// Ranks are assigned over the full customer set before truncation, so a
/// tie straddling the cutoff still reports the rank it earned.
pub fn top_customers(dataset: &Dataset) -> Vec<TopCustomerRow> {
    let customers = dataset.customers_by_id();
    let ordered = customer_spend_groups(dataset);
    let spends: Vec<f64> = ordered.iter().map(|(_, spend)| *spend).collect();
    let ranks = rank_desc(&spends);

    ordered
        .into_iter()
        .zip(ranks)
        .take(TOP_CUSTOMER_LIMIT)
        .map(|((customer_id, total_spend), spend_rank)| TopCustomerRow {
            customer_id,
            name: customers[&customer_id].name.clone(),
            total_spend: round2(total_spend),
            spend_rank,
        })
        .collect()
}

/// Customers classified by the fixed spend cutoffs.
pub fn customer_spend_tiers(dataset: &Dataset) -> Vec<CustomerSpendRow> {
    let customers = dataset.customers_by_id();
    customer_spend_groups(dataset)
        .into_iter()
        .map(|(customer_id, total_spend)| CustomerSpendRow {
            customer_id,
            name: customers[&customer_id].name.clone(),
            total_spend: round2(total_spend),
            spend_tier: spend_tier(total_spend),
        })
        .collect()
}

/// Customers split into three spend tiles: VIP / Regular / Low.
///
/// Tiles shift between runs purely because other customers' totals
/// changed; the tile assignment is computed once and shared by the label
/// derivation.
pub fn customer_value_tiles(dataset: &Dataset) -> AnalyticsResult<Vec<CustomerTileRow>> {
    let customers = dataset.customers_by_id();
    let ordered = customer_spend_groups(dataset);
    let tiles = ntile(ordered.len(), VALUE_TILE_BUCKETS)?;

    Ok(ordered
        .into_iter()
        .zip(tiles)
        .map(|((customer_id, total_spend), tile)| CustomerTileRow {
            customer_id,
            name: customers[&customer_id].name.clone(),
            total_spend: round2(total_spend),
            tile,
            value_tier: value_tier(tile),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::*;
    use crate::sink::MemorySink;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().expect("timestamp")
    }

    /// Two stores, three films (one two-category), three customers.
    fn fixture() -> Dataset {
        let mut ds = Dataset {
            films: vec![
                Film { film_id: 1, title: "ALPHA".into() },
                Film { film_id: 2, title: "BRAVO".into() },
                Film { film_id: 3, title: "CHARLIE".into() },
            ],
            categories: vec![
                Category { category_id: 1, name: "Action".into() },
                Category { category_id: 2, name: "Drama".into() },
            ],
            film_categories: vec![
                FilmCategory { film_id: 1, category_id: 1 },
                FilmCategory { film_id: 2, category_id: 2 },
                FilmCategory { film_id: 3, category_id: 1 },
                FilmCategory { film_id: 3, category_id: 2 },
            ],
            customers: vec![
                Customer { customer_id: 1, name: "MARY SMITH".into() },
                Customer { customer_id: 2, name: "JOHN DOE".into() },
                Customer { customer_id: 3, name: "ANNA LEE".into() },
            ],
            stores: vec![Store { store_id: 1 }, Store { store_id: 2 }],
            ..Default::default()
        };

        // Inventory: film 1 and 2 at store 1, film 3 at store 2.
        ds.inventory = vec![
            Inventory { inventory_id: 10, film_id: 1, store_id: 1 },
            Inventory { inventory_id: 11, film_id: 2, store_id: 1 },
            Inventory { inventory_id: 12, film_id: 3, store_id: 2 },
        ];

        let mut rental_id = 100;
        let mut payment_id = 1000;
        let mut add = |ds: &mut Dataset,
                       customer_id: u32,
                       inventory_id: u32,
                       amount: f64,
                       rented: &str,
                       returned: Option<&str>| {
            rental_id += 1;
            payment_id += 1;
            ds.rentals.push(Rental {
                rental_id,
                customer_id,
                inventory_id,
                rental_date: ts(rented),
                return_date: returned.map(ts),
            });
            ds.payments.push(Payment {
                payment_id,
                customer_id,
                rental_id,
                amount,
                payment_date: ts(rented),
            });
        };

        // January: 30.00 total; February: 10.00.
        add(&mut ds, 1, 10, 10.0, "2023-01-05T00:00:00Z", Some("2023-01-07T00:00:00Z"));
        add(&mut ds, 1, 11, 12.0, "2023-01-10T00:00:00Z", Some("2023-01-14T00:00:00Z"));
        add(&mut ds, 2, 12, 8.0, "2023-01-20T00:00:00Z", Some("2023-01-22T00:00:00Z"));
        add(&mut ds, 3, 10, 10.0, "2023-02-01T00:00:00Z", None);

        ds
    }

    #[test]
    fn kpi_overall_single_row() {
        let rows = kpi_overall(&fixture());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_revenue, 40.0);
        assert_eq!(rows[0].total_transactions, 4);
        assert_eq!(rows[0].avg_transaction, Some(10.0));
    }

    #[test]
    fn kpi_overall_empty_dataset_yields_empty_table() {
        assert!(kpi_overall(&Dataset::default()).is_empty());
    }

    #[test]
    fn store_kpi_groups_and_orders_by_revenue() {
        let rows = kpi_revenue_by_store(&fixture());
        assert_eq!(rows.len(), 2);
        // Store 1: 10 + 12 + 10 = 32, store 2: 8.
        assert_eq!(rows[0].store_id, 1);
        assert_eq!(rows[0].store_revenue, 32.0);
        assert_eq!(rows[0].total_transactions, 3);
        assert_eq!(rows[1].store_id, 2);
        assert_eq!(rows[1].avg_payment_per_store, Some(8.0));
    }

    #[test]
    fn monthly_trend_orders_months_and_averages() {
        let rows = monthly_revenue_trend(&fixture());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2023-01");
        assert_eq!(rows[0].revenue, 30.0);
        assert_eq!(rows[0].moving_avg_revenue, 30.0);
        assert_eq!(rows[1].month, "2023-02");
        assert_eq!(rows[1].moving_avg_revenue, 20.0);
    }

    #[test]
    fn category_shares_sum_to_one_hundred() {
        let rows = category_revenue_share(&fixture());
        // Film 3 (8.00) fans out to both categories: Action 10+10+8, Drama 12+8.
        assert_eq!(rows[0].category, "Action");
        assert_eq!(rows[0].total_revenue, 28.0);
        let pct_sum: f64 = rows
            .iter()
            .map(|r| r.revenue_percentage.unwrap_or(0.0))
            .sum();
        assert!((pct_sum - 100.0).abs() < 0.01, "shares summed to {pct_sum}");
    }

    #[test]
    fn film_tiers_regular_at_small_volume() {
        let rows = film_performance_tiers(&fixture());
        assert_eq!(rows.len(), 3);
        assert!(
            rows.iter()
                .all(|r| r.performance_tier == crate::analytics::segment::FilmTier::Regular)
        );
        // Revenue-descending: film 1 (20.00) first, then film 2, film 3.
        assert_eq!(rows[0].film_id, 1);
        assert_eq!(rows[0].total_revenue, 20.0);
        assert_eq!(rows[1].film_id, 2);
    }

    #[test]
    fn top_customers_ranks_and_truncates() {
        let rows = top_customers(&fixture());
        // Spends: customer 1 → 22.00, customer 3 → 10.00, customer 2 → 8.00.
        assert_eq!(rows[0].customer_id, 1);
        assert_eq!(rows[0].spend_rank, 1);
        assert_eq!(rows[1].customer_id, 3);
        assert_eq!(rows[1].spend_rank, 2);
        assert_eq!(rows[2].customer_id, 2);
        assert_eq!(rows[2].spend_rank, 3);
    }

    #[test]
    fn top_customers_tie_shares_rank_and_skips() {
        let mut ds = fixture();
        // Lift customer 2 to tie customer 3 at 10.00.
        ds.payments.push(Payment {
            payment_id: 9999,
            customer_id: 2,
            rental_id: 101,
            amount: 2.0,
            payment_date: ts("2023-02-02T00:00:00Z"),
        });
        let rows = top_customers(&ds);
        assert_eq!(rows[0].spend_rank, 1);
        assert_eq!(rows[1].spend_rank, 2);
        assert_eq!(rows[2].spend_rank, 2);
        // Tied customers order by id.
        assert_eq!(rows[1].customer_id, 2);
        assert_eq!(rows[2].customer_id, 3);
    }

    #[test]
    fn top_customers_caps_at_ten() {
        let mut ds = fixture();
        for i in 10..30u32 {
            ds.customers.push(Customer {
                customer_id: i,
                name: format!("CUSTOMER {i}"),
            });
            ds.payments.push(Payment {
                payment_id: 5000 + i,
                customer_id: i,
                rental_id: 101,
                amount: f64::from(i),
                payment_date: ts("2023-03-01T00:00:00Z"),
            });
        }
        assert_eq!(top_customers(&ds).len(), 10);
    }

    #[test]
    fn spend_tiers_use_strict_thresholds() {
        let mut ds = Dataset::default();
        ds.rentals.push(Rental {
            rental_id: 1,
            customer_id: 1,
            inventory_id: 1,
            rental_date: ts("2023-01-01T00:00:00Z"),
            return_date: None,
        });
        for (id, amount) in [(1u32, 1000.0), (2, 1000.01), (3, 500.0)] {
            ds.customers.push(Customer {
                customer_id: id,
                name: format!("C{id}"),
            });
            ds.payments.push(Payment {
                payment_id: id,
                customer_id: id,
                rental_id: 1,
                amount,
                payment_date: ts("2023-01-01T00:00:00Z"),
            });
        }
        let rows = customer_spend_tiers(&ds);
        let tier_of = |id: u32| {
            rows.iter()
                .find(|r| r.customer_id == id)
                .map(|r| r.spend_tier)
                .expect("row present")
        };
        use crate::analytics::segment::SpendTier;
        assert_eq!(tier_of(1), SpendTier::Medium);
        assert_eq!(tier_of(2), SpendTier::High);
        assert_eq!(tier_of(3), SpendTier::Low);
    }

    #[test]
    fn value_tiles_split_three_ways() {
        let rows = customer_value_tiles(&fixture()).expect("tile count is valid");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tile, 1);
        assert_eq!(rows[1].tile, 2);
        assert_eq!(rows[2].tile, 3);
        use crate::analytics::segment::ValueTier;
        assert_eq!(rows[0].value_tier, ValueTier::Vip);
        assert_eq!(rows[2].value_tier, ValueTier::Low);
    }

    #[test]
    fn pareto_bands_are_monotone() {
        let rows = film_revenue_pareto(&fixture());
        assert_eq!(rows.len(), 3);
        // Cumulative is inclusive and ascending.
        assert!(rows[0].cumulative_revenue <= rows[1].cumulative_revenue);
        // Once Long Tail, always Long Tail.
        let mut seen_tail = false;
        for row in &rows {
            use crate::analytics::segment::ParetoBand;
            if row.pareto_class == ParetoBand::LongTail {
                seen_tail = true;
            } else {
                assert!(!seen_tail, "Top band after Long Tail at {}", row.film_id);
            }
        }
        // Last row's cumulative equals the grand total.
        assert_eq!(rows[2].cumulative_revenue, 40.0);
    }

    #[test]
    fn durations_exclude_open_rentals() {
        let rows = film_rental_durations(&fixture());
        // Film 1's second rental (open) is excluded: one returned rental of 2 days.
        let film1 = rows.iter().find(|r| r.film_id == 1).expect("film 1");
        assert_eq!(film1.rentals_returned, 1);
        assert_eq!(film1.avg_rental_days, Some(2.0));
        let film2 = rows.iter().find(|r| r.film_id == 2).expect("film 2");
        assert_eq!(film2.avg_rental_days, Some(4.0));
        // Ordered by average descending.
        assert_eq!(rows[0].film_id, 2);
    }

    #[test]
    fn rental_rank_counts_open_rentals_too() {
        let rows = film_rental_rank(&fixture());
        // Film 1 has two rentals (one open), films 2 and 3 one each.
        assert_eq!(rows[0].film_id, 1);
        assert_eq!(rows[0].total_rentals, 2);
        assert_eq!(rows[0].rental_rank, 1);
        // Films 2 and 3 tie at one rental: shared rank 2, then nothing at 3.
        assert_eq!(rows[1].rental_rank, 2);
        assert_eq!(rows[2].rental_rank, 2);
    }

    #[test]
    fn all_reports_empty_on_empty_dataset() {
        let ds = Dataset::default();
        for report in Report::ALL {
            let rows = build_rows(report, &ds).expect("no error on empty input");
            assert!(rows.is_empty(), "{report} produced rows on empty input");
        }
    }

    #[test]
    fn reruns_are_byte_identical() {
        let ds = fixture();
        for report in Report::ALL {
            let first = serde_json::to_string(&build_rows(report, &ds).expect("rows")).unwrap();
            let second = serde_json::to_string(&build_rows(report, &ds).expect("rows")).unwrap();
            assert_eq!(first, second, "{report} was not idempotent");
        }
    }

    #[test]
    fn run_report_replaces_prior_table() {
        let ds = fixture();
        let mut sink = MemorySink::new();
        run_report(Report::KpiOverall, &ds, &mut sink).expect("first run");
        run_report(Report::KpiOverall, &ds, &mut sink).expect("second run");
        let table = sink.table("kpi_overall").expect("table present");
        assert_eq!(table.len(), 1, "rerun must replace, not append");
    }
}
