use crate::{browser::Page,
            config::{RunConfig, Timing},
            error::{Result, ScrapeError},
            scrape::{Selectors, wait::poll_until}};

/// Consecutive no-growth scrolls tolerated before the feed counts as exhausted
pub const STALL_RETRIES: usize = 3;

/// Reference to one card in the loaded feed, by its position in document order.
///
/// Only meaningful for the run that produced it; the extractor re-resolves it against the
/// page every time it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingHandle {
    index: usize,
}

impl ListingHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// Zero-based position in the feed
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Drives scroll-triggered pagination of the results feed
pub struct FeedLoader<'a, P: Page> {
    page: &'a P,
    maps_url: &'a str,
    selectors: &'a Selectors,
    timing: &'a Timing,
}

impl<'a, P: Page> FeedLoader<'a, P> {
    pub fn new(page: &'a P, config: &'a RunConfig) -> Self {
        Self { page, maps_url: &config.maps_url, selectors: &config.selectors, timing: &config.timing }
    }

    /// Search for `query` and paginate until `target_count` cards are loaded or the feed stops growing.
    ///
    /// Returns at most `target_count` handles in document order. Fails with
    /// [`ScrapeError::FeedUnavailable`] when the results container never appears or its cards
    /// cannot be counted. Driver failures after that end pagination with the cards already loaded.
    pub fn load(&self, query: &str, target_count: usize) -> Result<Vec<ListingHandle>> {
        self.submit_query(query)?;

        self.page
            .wait_for_selector(&self.selectors.feed, self.timing.feed_timeout)
            .map_err(|e| ScrapeError::FeedUnavailable { selector: self.selectors.feed.clone(), reason: e.to_string() })?;

        log::info!("Scrolling to load {} results...", target_count);

        let mut count = self
            .page
            .count(&self.selectors.listing)
            .map_err(|e| ScrapeError::FeedUnavailable { selector: self.selectors.listing.clone(), reason: e.to_string() })?;
        let mut stalls = 0;

        while count < target_count {
            match self.page.scroll_to_end(&self.selectors.feed) {
                Ok(true) => {}
                Ok(false) => {
                    log::warn!("Results feed disappeared while scrolling; keeping {} loaded results", count);
                    break;
                }
                Err(e) => {
                    log::warn!("Scrolling the results feed failed ({}); keeping {} loaded results", e, count);
                    break;
                }
            }

            let loaded = match self.wait_for_growth(count) {
                Ok(loaded) => loaded,
                Err(e) => {
                    log::warn!("Counting loaded results failed ({}); keeping {} loaded results", e, count);
                    break;
                }
            };

            if loaded == count {
                stalls += 1;
                if stalls > STALL_RETRIES {
                    log::info!("No more results loading.");
                    break;
                }
            } else {
                stalls = 0;
            }

            count = loaded;
            log::info!("Loaded {} results...", count);
        }

        let handles: Vec<ListingHandle> = (0..count.min(target_count)).map(ListingHandle::new).collect();
        log::debug!("Feed loader returning {} of {} materialized listings", handles.len(), count);

        Ok(handles)
    }

    /// Type the query into the search box, or fall back to the search URL when the box is missing
    fn submit_query(&self, query: &str) -> Result<()> {
        let typed = self
            .page
            .fill_role("searchbox", &self.selectors.search_box, query)
            .and_then(|_| self.page.press_key("Enter"));

        if let Err(e) = typed {
            log::warn!("Search box unavailable ({}); searching via URL instead", e);
            self.page.navigate(&search_url(self.maps_url, query))?;
        }

        Ok(())
    }

    /// Wait up to the scroll settle time for more than `previous` cards; returns the latest count
    fn wait_for_growth(&self, previous: usize) -> Result<usize> {
        let mut latest = previous;
        poll_until(self.timing.scroll_settle, self.timing.poll_interval, || {
            latest = self.page.count(&self.selectors.listing)?;
            Ok(latest > previous)
        })?;
        Ok(latest)
    }
}

/// Direct search URL for `query` under the maps base URL
pub fn search_url(maps_url: &str, query: &str) -> String {
    format!("{}/search/{}", maps_url.trim_end_matches('/'), urlencoding::encode(query.trim()))
}
