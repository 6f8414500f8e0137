use crate::{error::{Result, ScrapeError},
            scrape::Selectors};
use std::{path::PathBuf, time::Duration};

/// Entry page for a run
pub const MAPS_URL: &str = "https://www.google.com/maps";

/// Output encoding for the exported leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// Excel workbook with a single sheet and a bold header row
    #[default]
    Xlsx,
    /// Comma-separated table with a header row
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to a workbook
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Bounds for every wait point in a run
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// How long the results feed may take to appear after searching
    pub feed_timeout: Duration,
    /// How long to look for the consent dialog before assuming there is none
    pub consent_timeout: Duration,
    /// How long to wait for new cards after each scroll
    pub scroll_settle: Duration,
    /// How long the detail panel may take to show the activated listing
    pub detail_timeout: Duration,
    /// Delay between condition checks while waiting
    pub poll_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            feed_timeout: Duration::from_secs(10),
            consent_timeout: Duration::from_secs(3),
            scroll_settle: Duration::from_secs(2),
            detail_timeout: Duration::from_secs(3),
            poll_interval: Duration::from_millis(200),
        }
    }
}

impl Timing {
    /// All waits collapsed to a single check; for scripted pages that settle instantly
    pub fn immediate() -> Self {
        Self {
            feed_timeout: Duration::ZERO,
            consent_timeout: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            detail_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
        }
    }
}

/// Immutable parameters for one scraping run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Free-text niche and location, e.g. "Plumbers in Miami"
    pub search_query: String,
    /// Cap on listings paginated and extracted
    pub max_results: usize,
    /// Destination file for the exported table
    pub output_path: PathBuf,
    pub format: ExportFormat,
    pub maps_url: String,
    pub selectors: Selectors,
    pub timing: Timing,
}

impl RunConfig {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            max_results: 30,
            output_path: PathBuf::from("leads_results.xlsx"),
            format: ExportFormat::Xlsx,
            maps_url: MAPS_URL.to_string(),
            selectors: Selectors::default(),
            timing: Timing::default(),
        }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn maps_url(mut self, url: impl Into<String>) -> Self {
        self.maps_url = url.into();
        self
    }

    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.search_query.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("search query must not be empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ScrapeError::InvalidConfig("output path must not be empty".to_string()));
        }
        if self.maps_url.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("maps URL must not be empty".to_string()));
        }
        Ok(())
    }
}
