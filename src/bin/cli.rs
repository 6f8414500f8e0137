//! maps-leads CLI
//!
//! Searches Google Maps for a niche and location, collects the matching business listings, and
//! writes them as a lead table with businesses lacking a website listed first.

use anyhow::Context;
use clap::Parser;
use maps_leads::{BrowserSession, ExportFormat, LaunchOptions, RunConfig, RunController, RunOutcome, Timing,
                 browser::DEFAULT_USER_AGENT, exporter_for};
use std::{path::PathBuf, time::Duration};

#[derive(Parser)]
#[command(name = "maps-leads")]
#[command(version)]
#[command(about = "Extract business leads from Google Maps search results", long_about = None)]
struct Cli {
    /// Search query, e.g. "Plumbers in Miami"
    #[arg(long, short = 'q')]
    query: String,

    /// Maximum number of listings to load and extract
    #[arg(long, short = 'n', default_value = "30")]
    max_results: usize,

    /// Destination file
    #[arg(long, short = 'o', value_name = "PATH", default_value = "leads_results.xlsx")]
    output: PathBuf,

    /// Output format (default: inferred from the output extension)
    #[arg(long, short = 'f', value_enum)]
    format: Option<ExportFormat>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// User agent presented to Maps
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Disable the Chrome sandbox (needed when running as root in containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Maps entry page
    #[arg(long, value_name = "URL", default_value = maps_leads::config::MAPS_URL)]
    maps_url: String,

    /// How long the results feed may take to appear, in milliseconds
    #[arg(long, default_value = "10000")]
    feed_timeout_ms: u64,

    /// How long to wait for new results after each scroll, in milliseconds
    #[arg(long, default_value = "2000")]
    scroll_settle_ms: u64,

    /// How long a listing's detail panel may take to open, in milliseconds
    #[arg(long, default_value = "3000")]
    detail_timeout_ms: u64,
}

impl Cli {
    fn timing(&self) -> Timing {
        Timing {
            feed_timeout: Duration::from_millis(self.feed_timeout_ms),
            scroll_settle: Duration::from_millis(self.scroll_settle_ms),
            detail_timeout: Duration::from_millis(self.detail_timeout_ms),
            ..Timing::default()
        }
    }

    fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new()
            .headless(!self.headed)
            .user_agent(Some(self.user_agent.clone()))
            .sandbox(!self.no_sandbox);

        if let Some(ref path) = self.executable_path {
            options = options.chrome_path(path);
        }
        if let Some(ref dir) = self.user_data_dir {
            options = options.user_data_dir(dir);
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let format = cli.format.unwrap_or_else(|| ExportFormat::from_path(&cli.output));
    let config = RunConfig::new(cli.query.clone())
        .max_results(cli.max_results)
        .output_path(cli.output.clone())
        .format(format)
        .maps_url(cli.maps_url.clone())
        .timing(cli.timing());
    config.validate()?;

    log::info!("Browser mode: {}", if cli.headed { "headed" } else { "headless" });
    if let Some(ref path) = cli.executable_path {
        log::info!("Browser executable: {}", path.display());
    }

    let session = BrowserSession::launch(cli.launch_options()).context("Failed to start browser")?;
    let exporter = exporter_for(config.format, &config.output_path);
    let controller = RunController::new(config, session)?;

    match controller.run(exporter.as_ref())? {
        RunOutcome::Exported(summary) => {
            log::info!(
                "{} leads exported ({} without website, {} listings skipped)",
                summary.extracted,
                summary.without_website,
                summary.failed
            );
        }
        RunOutcome::NoResults(summary) => {
            log::info!("No leads extracted from {} listings", summary.discovered);
        }
    }

    Ok(())
}
