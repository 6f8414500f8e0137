use thiserror::Error;

/// Result type alias for lead extraction operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors produced while driving the browser, paginating the feed, or exporting leads
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser process could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Navigation to a URL failed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// An element required for an interaction could not be located
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// JavaScript evaluation failed or returned an unexpected value
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A browser interaction (click, fill, key press) failed
    #[error("Interaction '{action}' failed: {reason}")]
    InteractionFailed { action: String, reason: String },

    /// A bounded wait expired
    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u128 },

    /// The results feed never appeared; fatal for the run
    #[error("Results feed '{selector}' unavailable: {reason}")]
    FeedUnavailable { selector: String, reason: String },

    /// A single listing could not be processed; the run continues without it
    #[error("Extraction of listing #{index} failed: {reason}")]
    ExtractionFailed { index: usize, reason: String },

    /// Run configuration rejected before the browser was touched
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Wrap any displayable driver error as a failed interaction
    pub fn interaction(action: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InteractionFailed { action: action.into(), reason: reason.to_string() }
    }
}
