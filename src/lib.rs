//! # maps-leads
//!
//! Extracts business leads (name, address, phone, website, rating, review count) from Google Maps
//! search results by driving Chrome/Chromium over the DevTools Protocol (CDP).
//!
//! ## How a run works
//!
//! 1. Open Maps and accept the cookie consent dialog when one is shown
//! 2. Search for the query and scroll the results feed until enough cards are loaded, or until
//!    the feed stops growing
//! 3. Open each card and read its detail panel, one field at a time; a missing field falls back
//!    to its default instead of dropping the lead
//! 4. Sort leads without a website first and write them to a workbook, CSV or JSON
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use maps_leads::{BrowserSession, CsvExporter, LaunchOptions, RunConfig, RunController, RunOutcome};
//!
//! # fn main() -> maps_leads::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::new().headless(true))?;
//! let config = RunConfig::new("Plumbers in Miami").max_results(20).output_path("leads.csv");
//! let exporter = CsvExporter::new(&config.output_path);
//!
//! let controller = RunController::new(config, session)?;
//! match controller.run(&exporter)? {
//!     RunOutcome::Exported(summary) => println!("{} leads written", summary.extracted),
//!     RunOutcome::NoResults(_) => println!("Nothing found"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline only talks to the browser through the [`Page`] trait, so any driver exposing
//! those primitives can stand in for [`BrowserSession`].
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and the page contract
//! - [`scrape`]: Feed pagination, detail extraction and text parsing
//! - [`record`]: The lead record and website sentinel
//! - [`export`]: Sorting and XLSX/CSV/JSON writers
//! - [`runner`]: Run orchestration
//! - [`config`]: Run parameters and wait timings
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod record;
pub mod runner;
pub mod scrape;

#[cfg(test)]
mod testing;

pub use browser::{BrowserSession, LaunchOptions, Page};
pub use config::{ExportFormat, RunConfig, Timing};
pub use error::{Result, ScrapeError};
pub use export::{CsvExporter, Exporter, JsonExporter, XlsxExporter, exporter_for, sort_leads};
pub use record::{LeadRecord, NO_WEBSITE, Website};
pub use runner::{RunController, RunOutcome, RunSummary};
pub use scrape::{FeedLoader, ListingHandle, RecordExtractor, Selectors};
