//! Batch business-intelligence reports over a DVD-rental transactional
//! dataset.
//!
//! The library computes eleven derived report tables (KPIs, trend curves,
//! customer/film/store segmentations, Pareto concentration) from read-only
//! source records and materializes each through a replace-on-rerun sink.
//! Every derived row is a pure function of the current source records:
//! there is no mutable state independent of them, and reruns against
//! unchanged data are byte-identical.
//!
//! Layering, leaves first:
//!
//! - [`model`] — typed read-only records and inner-join fact views
//! - [`analytics`] — aggregation primitives, windowing engine,
//!   segmentation rules, and the per-report assemblers
//! - [`sink`] — named-table replace sinks (in-memory and JSON directory)
//! - [`cli`] — the `renta` invocation surface

pub mod analytics;
pub mod cli;
pub mod model;
pub mod sink;

use cli::{Cli, Command};

use analytics::types::{AnalyticsError, Report};
use model::load_dataset;
use sink::{JsonDirSink, MemorySink, ReportSink};

/// Execute a parsed command line.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::List => {
            for report in Report::ALL {
                println!("{report}");
            }
            Ok(())
        }
        Command::Run {
            reports,
            all,
            data,
            out,
            pretty,
        } => {
            let dataset = load_dataset(&data)?;
            let requested: Vec<String> = if all {
                Report::ALL.iter().map(|r| r.table_name().into()).collect()
            } else {
                reports
            };

            match out {
                Some(dir) => {
                    let mut sink = JsonDirSink::new(dir, pretty);
                    run_requested(&requested, &dataset, &mut sink)
                }
                None => {
                    let mut sink = MemorySink::new();
                    let outcome = run_requested(&requested, &dataset, &mut sink);
                    let envelope = sink.into_json();
                    if pretty {
                        println!("{}", serde_json::to_string_pretty(&envelope)?);
                    } else {
                        println!("{envelope}");
                    }
                    outcome
                }
            }
        }
    }
}

/// Run each requested report independently.
///
/// A failing report (unknown name, invalid configuration) aborts only
/// itself; the remaining reports still run, and the overall command fails
/// afterwards if anything did.
fn run_requested(
    requested: &[String],
    dataset: &model::Dataset,
    sink: &mut dyn ReportSink,
) -> anyhow::Result<()> {
    let mut failures: Vec<(String, AnalyticsError)> = Vec::new();

    for name in requested {
        let Some(report) = Report::from_name(name) else {
            failures.push((name.clone(), AnalyticsError::UnknownReport(name.clone())));
            continue;
        };
        if let Err(err) = analytics::run_report(report, dataset, sink) {
            tracing::warn!(report = %report, error = %err, "report failed");
            failures.push((name.clone(), err));
        }
    }

    if failures.is_empty() {
        return Ok(());
    }
    let detail = failures
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ");
    anyhow::bail!("{} of {} report(s) failed — {detail}", failures.len(), requested.len())
}
