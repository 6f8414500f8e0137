use crate::{browser::Page,
            config::{RunConfig, Timing},
            error::{Result, ScrapeError},
            record::{LeadRecord, UNKNOWN_BUSINESS, Website},
            scrape::{ADDRESS_PREFIX, ListingHandle, PHONE_PREFIX, Selectors,
                     parse::{non_blank, parse_rating, parse_review_count, strip_label},
                     wait::poll_until}};

/// Raw field values read from one detail panel, before defaults are applied.
///
/// Every field is resolved independently; `None` means the source was absent, blank, or
/// unreadable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    /// Detail panel heading
    pub heading: Option<String>,
    /// Accessible label of the list card, used when the heading is missing
    pub listing_label: Option<String>,
    /// Address control's accessible label, prefix included
    pub address_label: Option<String>,
    /// Phone control's accessible label, prefix included
    pub phone_label: Option<String>,
    /// Website link target
    pub website_href: Option<String>,
    /// Combined rating/review text
    pub rating_fragment: Option<String>,
}

impl DetailFields {
    /// Apply per-field fallbacks and build the record
    pub fn into_record(self, source_query: &str, source_url: String) -> LeadRecord {
        let business_name = self
            .heading
            .and_then(|name| non_blank(&name))
            .or_else(|| self.listing_label.and_then(|label| non_blank(&label)))
            .unwrap_or_else(|| UNKNOWN_BUSINESS.to_string());

        let (rating, review_count) = match self.rating_fragment.as_deref() {
            Some(fragment) => (parse_rating(fragment), parse_review_count(fragment)),
            None => (None, 0),
        };

        LeadRecord {
            business_name,
            address: self.address_label.and_then(|label| strip_label(&label, ADDRESS_PREFIX)),
            phone_number: self.phone_label.and_then(|label| strip_label(&label, PHONE_PREFIX)),
            website: Website::from_href(self.website_href),
            rating,
            review_count,
            source_query: source_query.to_string(),
            source_url,
        }
    }
}

/// Opens one listing at a time and reads its detail panel into a [`LeadRecord`]
pub struct RecordExtractor<'a, P: Page> {
    page: &'a P,
    query: &'a str,
    selectors: &'a Selectors,
    timing: &'a Timing,
}

impl<'a, P: Page> RecordExtractor<'a, P> {
    pub fn new(page: &'a P, config: &'a RunConfig) -> Self {
        Self { page, query: &config.search_query, selectors: &config.selectors, timing: &config.timing }
    }

    /// Activate `handle`, wait for its detail view, and read every field.
    ///
    /// Missing fields never fail the record. Losing the listing, a detail view that never
    /// switches to it, or an unreadable page URL yields [`ScrapeError::ExtractionFailed`].
    pub fn extract(&self, handle: ListingHandle) -> Result<LeadRecord> {
        let index = handle.index();

        self.activate(index)?;

        let fields = self.read_fields(index);
        let source_url = self.page.current_url().map_err(|e| failure(index, e))?;

        Ok(fields.into_record(self.query, source_url))
    }

    /// Click the listing and wait until the detail view shows it.
    ///
    /// The view counts as switched once the URL leaves the previous listing's, or a heading
    /// different from the previous one appears.
    fn activate(&self, index: usize) -> Result<()> {
        let available = self.page.count(&self.selectors.listing).map_err(|e| failure(index, e))?;
        if index >= available {
            return Err(ScrapeError::ExtractionFailed {
                index,
                reason: format!("listing no longer present ({} cards on page)", available),
            });
        }

        let previous_url = self.page.current_url().ok();
        let previous_heading = self.heading_text().ok().flatten();
        self.page.click(&self.selectors.listing, index).map_err(|e| failure(index, e))?;

        let ready = poll_until(self.timing.detail_timeout, self.timing.poll_interval, || {
            if let Some(previous) = &previous_url {
                if self.page.current_url()? != *previous {
                    return Ok(true);
                }
            }
            Ok(match self.heading_text()? {
                Some(heading) => previous_heading.as_deref() != Some(heading.as_str()),
                None => false,
            })
        });

        match ready {
            Ok(true) => Ok(()),
            Ok(false) => Err(ScrapeError::ExtractionFailed {
                index,
                reason: format!(
                    "detail view not ready after {}ms; panel still shows the previous listing",
                    self.timing.detail_timeout.as_millis()
                ),
            }),
            Err(e) => Err(ScrapeError::ExtractionFailed { index, reason: format!("detail view not ready: {}", e) }),
        }
    }

    /// Trimmed detail heading, if one is shown
    fn heading_text(&self) -> Result<Option<String>> {
        if self.page.count(&self.selectors.detail_heading)? == 0 {
            return Ok(None);
        }
        Ok(self.page.inner_text(&self.selectors.detail_heading, 0)?.and_then(|text| non_blank(&text)))
    }

    fn read_fields(&self, index: usize) -> DetailFields {
        let s = self.selectors;

        let heading = self.resolve("business name", index, || self.page.inner_text(&s.detail_heading, 0));
        let listing_label = if heading.is_none() {
            self.resolve("card label", index, || self.page.attribute(&s.listing, index, "aria-label")).or_else(|| {
                self.resolve("card link label", index, || {
                    self.page.attribute_within(&s.listing, index, &s.listing_link, "aria-label")
                })
            })
        } else {
            None
        };

        DetailFields {
            heading,
            listing_label,
            address_label: self.resolve("address", index, || self.page.attribute(&s.address, 0, "aria-label")),
            phone_label: self.resolve("phone", index, || self.page.attribute(&s.phone, 0, "aria-label")),
            website_href: self.resolve("website", index, || self.page.attribute(&s.website, 0, "href")),
            rating_fragment: self.resolve("rating", index, || self.page.inner_text(&s.rating, 0)),
        }
    }

    /// Run one field read in isolation; absence and driver errors both collapse to `None`
    fn resolve<F>(&self, field: &str, index: usize, read: F) -> Option<String>
    where
        F: FnOnce() -> Result<Option<String>>,
    {
        match read() {
            Ok(Some(value)) => {
                let value = non_blank(&value);
                if value.is_none() {
                    log::debug!("Listing #{}: {} is blank", index, field);
                }
                value
            }
            Ok(None) => {
                log::debug!("Listing #{}: no {} found", index, field);
                None
            }
            Err(e) => {
                log::warn!("Listing #{}: reading {} failed: {}", index, field, e);
                None
            }
        }
    }
}

fn failure(index: usize, error: ScrapeError) -> ScrapeError {
    ScrapeError::ExtractionFailed { index, reason: error.to_string() }
}
