//! Feed pagination and detail-panel extraction
//!
//! - [`FeedLoader`]: scrolls the results feed until enough cards are materialized
//! - [`RecordExtractor`]: opens each card and reads its detail panel into a lead
//! - [`parse`]: text normalization for the fragments the panel exposes

pub mod extract;
pub mod feed;
pub mod parse;
pub mod selectors;
pub mod wait;

pub use extract::{DetailFields, RecordExtractor};
pub use feed::{FeedLoader, ListingHandle, STALL_RETRIES, search_url};
pub use selectors::{ADDRESS_PREFIX, PHONE_PREFIX, Selectors};
