//! bikeshare - Explore US bikeshare trip data from per-city CSV files

use bikeshare::{
    cli::Cli,
    data_loader::DataLoader,
    error::Result,
    interactive::InteractiveController,
    output::{OutputFormatter, get_formatter},
    pagination::leading_batches,
    statistics::compute_reports,
    types::CityKey,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load, report and print a single city without prompting
fn run_once(
    loader: &DataLoader,
    formatter: &dyn OutputFormatter,
    cli: &Cli,
    city: CityKey,
) -> Result<()> {
    let filter = cli.filter();
    info!("Running one-shot report for {} ({})", city, filter);

    let table = loader.load(city, &filter)?;
    let reports = compute_reports(&table, city);
    let rows = leading_batches(&table, cli.rows);
    println!(
        "{}",
        formatter.format_reports_with_rows(city, &filter, &reports, rows)
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence; --verbose only changes the fallback
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("bikeshare=info")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let show_progress =
        !cli.no_progress && !cli.json && is_terminal::is_terminal(std::io::stdout());
    let loader = DataLoader::new(&cli.data_dir).with_progress(show_progress);
    let formatter = get_formatter(cli.json);

    match cli.city {
        Some(city) => run_once(&loader, formatter.as_ref(), &cli, city),
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            InteractiveController::new(&loader, formatter.as_ref(), stdin.lock(), stdout.lock())
                .run()
        }
    }
}
