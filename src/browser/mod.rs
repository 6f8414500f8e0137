//! Browser session management and the page contract the scraper drives
//!
//! - [`Page`]: the primitives the feed loader and extractor rely on
//! - [`BrowserSession`]: `headless_chrome`-backed implementation
//! - [`LaunchOptions`]: launch configuration

pub mod config;
pub mod page;
pub mod session;

pub use config::{DEFAULT_USER_AGENT, LaunchOptions};
pub use page::Page;
pub use session::BrowserSession;
