//! Scripted in-memory [`Page`] used by unit tests

use crate::{browser::Page,
            error::{Result, ScrapeError},
            scrape::Selectors};
use std::{cell::{Cell, RefCell},
          time::Duration};

const RESULTS_URL: &str = "https://www.google.com/maps/search/results";

/// One result card and the detail panel it opens
#[derive(Debug, Clone)]
pub struct FakeListing {
    heading: Option<String>,
    card_label: Option<String>,
    link_label: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    rating: Option<String>,
    clickable: bool,
    inert: bool,
}

impl FakeListing {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            heading: Some(name.clone()),
            card_label: None,
            link_label: Some(name),
            address: None,
            phone: None,
            website: None,
            rating: None,
            clickable: true,
            inert: false,
        }
    }

    pub fn address(mut self, label: &str) -> Self {
        self.address = Some(label.to_string());
        self
    }

    pub fn phone(mut self, label: &str) -> Self {
        self.phone = Some(label.to_string());
        self
    }

    pub fn website(mut self, href: &str) -> Self {
        self.website = Some(href.to_string());
        self
    }

    pub fn rating(mut self, fragment: &str) -> Self {
        self.rating = Some(fragment.to_string());
        self
    }

    pub fn without_heading(mut self) -> Self {
        self.heading = None;
        self
    }

    /// Accessible label on the card element itself
    pub fn card_label(mut self, label: &str) -> Self {
        self.card_label = Some(label.to_string());
        self
    }

    pub fn without_link_label(mut self) -> Self {
        self.link_label = None;
        self
    }

    /// Clicks are accepted but the detail panel and URL never change
    pub fn inert(mut self) -> Self {
        self.inert = true;
        self
    }

    pub fn unclickable(mut self) -> Self {
        self.clickable = false;
        self
    }
}

/// A Maps-like page: a search box, a feed that grows on scroll, and a detail panel
pub struct FakePage {
    selectors: Selectors,
    listings: Vec<FakeListing>,
    batch: usize,
    grow_every: usize,
    has_feed: bool,
    has_search_box: bool,
    has_consent: bool,
    vanish_on_scroll: Option<usize>,
    failing: Vec<String>,
    failing_after: Vec<(String, usize)>,

    searched: Cell<bool>,
    feed_gone: Cell<bool>,
    materialized: Cell<usize>,
    active: Cell<Option<usize>>,
    url: RefCell<String>,
    scrolls: Cell<usize>,
    consent_clicks: Cell<usize>,
    typed: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
}

impl FakePage {
    pub fn new(listings: Vec<FakeListing>) -> Self {
        Self {
            selectors: Selectors::default(),
            batch: listings.len().max(1),
            listings,
            grow_every: 1,
            has_feed: true,
            has_search_box: true,
            has_consent: false,
            vanish_on_scroll: None,
            failing: Vec::new(),
            failing_after: Vec::new(),
            searched: Cell::new(false),
            feed_gone: Cell::new(false),
            materialized: Cell::new(0),
            active: Cell::new(None),
            url: RefCell::new("about:blank".to_string()),
            scrolls: Cell::new(0),
            consent_clicks: Cell::new(0),
            typed: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
        }
    }

    /// Cards materialized on search and added per growing scroll
    pub fn batch(mut self, batch: usize) -> Self {
        self.batch = batch.max(1);
        self
    }

    /// Only every n-th scroll loads more cards
    pub fn grow_every(mut self, n: usize) -> Self {
        self.grow_every = n.max(1);
        self
    }

    pub fn without_feed(mut self) -> Self {
        self.has_feed = false;
        self
    }

    pub fn without_search_box(mut self) -> Self {
        self.has_search_box = false;
        self
    }

    pub fn with_consent(mut self) -> Self {
        self.has_consent = true;
        self
    }

    /// The feed container disappears on the n-th scroll
    pub fn feed_vanishes_on_scroll(mut self, n: usize) -> Self {
        self.vanish_on_scroll = Some(n);
        self
    }

    /// Reads of `selector` fail with a driver error
    pub fn failing(mut self, selector: &str) -> Self {
        self.failing.push(selector.to_string());
        self
    }

    /// Reads of `selector` fail once `scrolls` scrolls have happened
    pub fn failing_after_scrolls(mut self, selector: &str, scrolls: usize) -> Self {
        self.failing_after.push((selector.to_string(), scrolls));
        self
    }

    /// Show search results without going through the search box
    pub fn submit_search(&self) {
        self.searched.set(true);
        self.materialized.set(self.batch.min(self.listings.len()));
        *self.url.borrow_mut() = RESULTS_URL.to_string();
    }

    pub fn listing_url(&self, index: usize) -> String {
        format!("https://www.google.com/maps/place/listing-{}", index)
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }

    pub fn consent_clicks(&self) -> usize {
        self.consent_clicks.get()
    }

    pub fn typed(&self) -> Vec<String> {
        self.typed.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    fn feed_visible(&self) -> bool {
        self.has_feed && self.searched.get() && !self.feed_gone.get()
    }

    fn active_listing(&self) -> Option<&FakeListing> {
        self.active.get().and_then(|i| self.listings.get(i))
    }

    fn check(&self, selector: &str) -> Result<()> {
        let scrolled = self.scrolls.get();
        if self.failing.iter().any(|s| s == selector)
            || self.failing_after.iter().any(|(s, after)| s == selector && scrolled >= *after)
        {
            return Err(ScrapeError::EvaluationFailed(format!("scripted failure for '{}'", selector)));
        }
        Ok(())
    }

    /// Value (text or attribute) a selector exposes on the detail panel
    fn detail_value(&self, selector: &str) -> Option<String> {
        let listing = self.active_listing()?;
        let s = &self.selectors;
        if selector == s.detail_heading {
            listing.heading.clone()
        } else if selector == s.address {
            listing.address.clone()
        } else if selector == s.phone {
            listing.phone.clone()
        } else if selector == s.website {
            listing.website.clone()
        } else if selector == s.rating {
            listing.rating.clone()
        } else {
            None
        }
    }
}

impl Page for FakePage {
    fn navigate(&self, url: &str) -> Result<()> {
        self.navigations.borrow_mut().push(url.to_string());
        if url.contains("/search/") {
            self.submit_search();
        } else {
            *self.url.borrow_mut() = url.to_string();
        }
        Ok(())
    }

    fn current_url(&self) -> Result<String> {
        Ok(self.url.borrow().clone())
    }

    fn click_role(&self, role: &str, name: &str, timeout: Duration) -> Result<()> {
        if self.has_consent && role == "button" && name == self.selectors.consent_button {
            self.consent_clicks.set(self.consent_clicks.get() + 1);
            return Ok(());
        }
        Err(ScrapeError::Timeout { what: format!("{} '{}'", role, name), timeout_ms: timeout.as_millis() })
    }

    fn fill_role(&self, role: &str, name: &str, text: &str) -> Result<()> {
        if self.has_search_box && role == "searchbox" && name == self.selectors.search_box {
            self.typed.borrow_mut().push(text.to_string());
            return Ok(());
        }
        Err(ScrapeError::ElementNotFound(format!("{} '{}'", role, name)))
    }

    fn press_key(&self, key: &str) -> Result<()> {
        if key == "Enter" && !self.typed.borrow().is_empty() {
            self.submit_search();
        }
        Ok(())
    }

    fn count(&self, selector: &str) -> Result<usize> {
        self.check(selector)?;
        let s = &self.selectors;
        let count = if selector == s.feed {
            usize::from(self.feed_visible())
        } else if selector == s.listing {
            if self.searched.get() { self.materialized.get() } else { 0 }
        } else {
            usize::from(self.detail_value(selector).is_some())
        };
        Ok(count)
    }

    fn inner_text(&self, selector: &str, nth: usize) -> Result<Option<String>> {
        self.check(selector)?;
        if nth > 0 {
            return Ok(None);
        }
        Ok(self.detail_value(selector))
    }

    fn attribute(&self, selector: &str, nth: usize, name: &str) -> Result<Option<String>> {
        self.check(selector)?;
        let s = &self.selectors;
        if selector == s.listing {
            if name != "aria-label" || nth >= self.materialized.get() {
                return Ok(None);
            }
            return Ok(self.listings.get(nth).and_then(|l| l.card_label.clone()));
        }
        if nth > 0 {
            return Ok(None);
        }
        let expected = if selector == s.website { "href" } else { "aria-label" };
        if name != expected {
            return Ok(None);
        }
        Ok(self.detail_value(selector))
    }

    fn attribute_within(&self, container: &str, nth: usize, selector: &str, name: &str) -> Result<Option<String>> {
        self.check(container)?;
        let s = &self.selectors;
        if container != s.listing || selector != s.listing_link || name != "aria-label" {
            return Ok(None);
        }
        if nth >= self.materialized.get() {
            return Ok(None);
        }
        Ok(self.listings.get(nth).and_then(|l| l.link_label.clone()))
    }

    fn click(&self, selector: &str, nth: usize) -> Result<()> {
        if selector != self.selectors.listing || nth >= self.materialized.get() {
            return Err(ScrapeError::ElementNotFound(format!("'{}' #{}", selector, nth)));
        }
        if !self.listings[nth].clickable {
            return Err(ScrapeError::interaction("click", "node is detached from document"));
        }
        if self.listings[nth].inert {
            return Ok(());
        }
        self.active.set(Some(nth));
        *self.url.borrow_mut() = self.listing_url(nth);
        Ok(())
    }

    fn scroll_to_end(&self, selector: &str) -> Result<bool> {
        if selector != self.selectors.feed || !self.feed_visible() {
            return Ok(false);
        }

        let attempt = self.scrolls.get() + 1;
        self.scrolls.set(attempt);

        if self.vanish_on_scroll == Some(attempt) {
            self.feed_gone.set(true);
            return Ok(false);
        }

        if attempt % self.grow_every == 0 {
            let grown = (self.materialized.get() + self.batch).min(self.listings.len());
            self.materialized.set(grown);
        }
        Ok(true)
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        if self.count(selector)? > 0 {
            Ok(())
        } else {
            Err(ScrapeError::Timeout { what: format!("'{}'", selector), timeout_ms: timeout.as_millis() })
        }
    }
}
