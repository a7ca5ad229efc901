mod render;

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use pickup_core::{load_catalog, AppConfig, Catalog, ModelQuery};
use pickup_fulfillment::{run_query, FulfillmentClient, QueryOptions, RetryPolicy};
use tracing_subscriber::EnvFilter;

/// Exit status for configuration and usage errors, matching clap's own.
const USAGE_ERROR: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "pickup")]
#[command(about = "Check Apple Store pick-up availability for the iPhone 17 Pro family in China")]
struct Cli {
    /// City or postal code in China to search near
    #[arg(long, default_value = "Beijing")]
    location: String,

    /// Apple Store code (e.g. R320) to query directly
    #[arg(long = "store")]
    store_code: Option<String>,

    /// Restrict the search to a model label; repeatable. Defaults to every model
    #[arg(long = "model")]
    models: Vec<String>,

    /// Apple part number to filter for (e.g. MTUV3CH/A); repeatable
    #[arg(long = "part")]
    parts: Vec<String>,

    /// Extra attempts when the Apple endpoint fails
    #[arg(long, default_value_t = 0)]
    retry: u32,

    /// Seconds to wait between attempts
    #[arg(long, default_value = "2.0", value_parser = parse_retry_delay)]
    retry_delay: Duration,

    /// Print the raw JSON payload for debugging
    #[arg(long)]
    show_raw: bool,
}

fn parse_retry_delay(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|e| format!("'{raw}' is not a number: {e}"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("'{raw}' must be a finite, non-negative number of seconds"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(USAGE_ERROR)
        }
    }
}

/// Runs every selected model query in order.
///
/// Setup problems (config, catalog, unknown model) are returned as errors
/// before any request is made. A transport failure stops the run and maps
/// to [`ExitCode::FAILURE`]; models that were not reached are not queried.
async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = pickup_core::load_app_config()?;
    init_tracing(&config)?;

    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path)?,
        None => Catalog::builtin(),
    };
    let queries = catalog.resolve_selection(&cli.models)?;
    tracing::debug!(
        models = queries.len(),
        location = %cli.location,
        retries = cli.retry,
        "starting pickup run"
    );

    let client = FulfillmentClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build fulfilment client: {e}"))?;

    let options = QueryOptions {
        location: Some(cli.location),
        store_code: cli.store_code,
        parts: cli.parts,
        retry: RetryPolicy::new(cli.retry, cli.retry_delay),
    };

    let mut stdout = std::io::stdout().lock();
    run_models(&client, &queries, &options, cli.show_raw, &mut stdout).await
}

/// Queries each model in order, writing presentation lines to `out`.
///
/// Stops at the first transport failure and returns [`ExitCode::FAILURE`]
/// without starting the remaining models.
async fn run_models<W: Write>(
    client: &FulfillmentClient,
    queries: &[&ModelQuery],
    options: &QueryOptions,
    show_raw: bool,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    for query in queries {
        writeln!(out, "\n=== {} ===", query.label)?;

        let report = match run_query(client, query, options).await {
            Ok(report) => report,
            Err(err) => {
                eprintln!("Failed to contact Apple Store API: {err}");
                return Ok(ExitCode::FAILURE);
            }
        };

        if show_raw {
            writeln!(out, "{}", serde_json::to_string_pretty(&report.payload)?)?;
        }

        for line in render::render_outcome(&report.outcome) {
            writeln!(out, "{line}")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
