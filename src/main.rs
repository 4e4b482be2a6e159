use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean JSON for piped consumers.
    let filter =
        EnvFilter::try_from_env("RENTA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = rental_analytics::cli::Cli::parse();
    rental_analytics::run_cli(cli)
}
