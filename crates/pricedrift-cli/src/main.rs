use clap::Parser;
use eyre::{Result, WrapErr};
use pricedrift_cli::args::Args;
use pricedrift_fastspring::FastSpringClient;
use pricedrift_report::{Aggregator, REPORT_FILES, RunSummary};
use pricedrift_scan::{ScanError, run_scan};
use tracing_subscriber::EnvFilter;

const CREDENTIALS_HINT: &str = "there was an error communicating with the FastSpring API, \
    most likely the API username and password are not correct";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = args.scan_options()?;
    let client = FastSpringClient::new(args.client_config())?;

    tracing::info!("analyzing started, this can take a while...");
    tracing::info!(
        "impatient? copy the CSV files being written to see the first results; \
         the scan keeps running until it is done"
    );

    let mut aggregator = Aggregator::create(&args.output_dir).wrap_err_with(|| {
        format!(
            "could not create reports in {}",
            args.output_dir.display()
        )
    })?;

    match run_scan(&client, &mut aggregator, &options).await {
        Ok(_) => {}
        Err(e @ ScanError::Count(_)) => return Err(eyre::Report::new(e).wrap_err(CREDENTIALS_HINT)),
        Err(e) => return Err(e.into()),
    }

    let summary = aggregator.finish()?;
    print_summary(&summary, &args);
    Ok(())
}

fn print_summary(summary: &RunSummary, args: &Args) {
    tracing::info!("done");
    tracing::info!("{} affected subscriptions", summary.counters.affected);
    tracing::info!(
        "of which {} due to 2022 overcharge issue",
        summary.counters.overcharge
    );
    tracing::info!(
        "of which {} due to VAT inclusive issue",
        summary.counters.vat_inclusive
    );
    tracing::info!(
        scanned = summary.scanned,
        skipped = summary.skipped,
        failed = summary.failed,
        "subscriptions processed"
    );
    tracing::info!("the results are stored in the files:");
    for name in REPORT_FILES {
        tracing::info!("{}", args.output_dir.join(name).display());
    }
}
