// gbb-scraper: scrape the WA Gas Bulletin Board flow, capacity and storage
// views into CSV artifacts plus a metadata summary.
//
// Exit status: 0 on a completed run, 1 when the browser could not be started
// or artifacts could not be written, 2 when `--fail-on-empty` is set and no
// feed produced data. `verify` exits 0 or 1.

use clap::{Args, Parser, Subcommand};
use gbb_scraper::{FeedKind, FeedTarget, ScrapeConfig, run_scrape, verify_output_dir};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "gbb-scraper", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check an output directory against the artifact contract
    Verify {
        #[arg(long, default_value = gbb_scraper::utils::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Directory receiving the CSV files and metadata.json
    #[arg(long, default_value = gbb_scraper::utils::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[arg(long)]
    flows_url: Option<String>,

    #[arg(long)]
    capacity_url: Option<String>,

    #[arg(long)]
    storage_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Navigation timeout per feed
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    #[arg(long, default_value_t = 5)]
    settle_secs: u64,

    #[arg(long, default_value_t = 10)]
    extended_settle_secs: u64,

    #[arg(long, default_value_t = 3)]
    inter_feed_secs: u64,

    /// Data rows kept per table
    #[arg(long, default_value_t = 10)]
    max_rows: usize,

    /// Give up on a feed that is still empty after the extended wait
    #[arg(long)]
    no_retry_after_wait: bool,

    /// Exit with status 2 when no feed produced data
    #[arg(long)]
    fail_on_empty: bool,

    /// Chromium binary to use instead of auto-discovery
    #[arg(long, env = "CHROMIUM_PATH")]
    chrome_path: Option<PathBuf>,
}

impl RunArgs {
    fn targets(&self) -> Vec<FeedTarget> {
        FeedKind::ALL
            .into_iter()
            .map(|kind| {
                let url = match kind {
                    FeedKind::Flows => self.flows_url.as_deref(),
                    FeedKind::Capacity => self.capacity_url.as_deref(),
                    FeedKind::Storage => self.storage_url.as_deref(),
                };
                FeedTarget::new(kind, url.unwrap_or(kind.default_url()))
            })
            .collect()
    }

    fn into_config(self) -> gbb_scraper::ScrapeResult<ScrapeConfig> {
        let targets = self.targets();
        ScrapeConfig::builder()
            .output_dir(self.output_dir)
            .targets(targets)
            .headless(!self.headed)
            .chrome_executable(self.chrome_path)
            .navigation_timeout(Duration::from_secs(self.timeout_secs))
            .settle_delay(Duration::from_secs(self.settle_secs))
            .extended_settle_delay(Duration::from_secs(self.extended_settle_secs))
            .inter_feed_delay(Duration::from_secs(self.inter_feed_secs))
            .max_rows_per_table(self.max_rows)
            .retry_after_extended_wait(!self.no_retry_after_wait)
            .fail_on_empty(self.fail_on_empty)
            .build()
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    for directive in ["chromiumoxide::handler=off", "chromiumoxide::conn=off"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    if let Some(Command::Verify { output_dir }) = cli.command {
        let report = verify_output_dir(&output_dir, &FeedTarget::defaults());
        for (feed, count) in &report.records_by_type {
            info!("{feed}: {count} records");
        }
        if report.is_ok() {
            info!("✓ {} is consistent", report.dir.display());
            return ExitCode::SUCCESS;
        }
        for problem in &report.problems {
            error!("✗ {problem}");
        }
        return ExitCode::FAILURE;
    }

    let config = match cli.run.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run_scrape(&config).await {
        Ok(summary) if summary.found_data() || !config.fail_on_empty() => ExitCode::SUCCESS,
        Ok(_) => {
            warn!("No data extracted from any feed");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("Scrape failed: {e}");
            ExitCode::FAILURE
        }
    }
}
