use crate::{browser::Page,
            config::RunConfig,
            error::Result,
            export::{Exporter, sort_leads},
            record::LeadRecord,
            scrape::{FeedLoader, RecordExtractor}};

/// How a completed run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Leads were written to the exporter's destination
    Exported(RunSummary),
    /// The run finished without producing a single lead; nothing was written
    NoResults(RunSummary),
}

impl RunOutcome {
    pub fn summary(&self) -> &RunSummary {
        match self {
            Self::Exported(summary) | Self::NoResults(summary) => summary,
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Listings returned by the feed loader
    pub discovered: usize,
    /// Leads extracted
    pub extracted: usize,
    /// Listings skipped after an extraction failure
    pub failed: usize,
    /// Extracted leads without a website
    pub without_website: usize,
}

/// Owns the page for a run and sequences consent, pagination, extraction and export
pub struct RunController<P: Page> {
    config: RunConfig,
    page: P,
}

impl<P: Page> RunController<P> {
    /// Validate `config` and take ownership of `page`; the page is released when the controller drops
    pub fn new(config: RunConfig, page: P) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, page })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Run the whole pipeline and hand the sorted leads to `exporter`.
    ///
    /// Only an unavailable feed (or a failed navigation or export) aborts the run; listings
    /// that fail extraction are logged and skipped.
    pub fn run(&self, exporter: &dyn Exporter) -> Result<RunOutcome> {
        let (mut records, summary) = self.collect()?;

        if records.is_empty() {
            log::info!("No results found.");
            return Ok(RunOutcome::NoResults(summary));
        }

        sort_leads(&mut records);
        exporter.export(&records)?;

        log::info!("Successfully saved {} leads to {}", records.len(), exporter.destination());
        Ok(RunOutcome::Exported(summary))
    }

    /// Navigate, search, paginate and extract; returns leads in feed order
    pub fn collect(&self) -> Result<(Vec<LeadRecord>, RunSummary)> {
        let query = self.config.search_query.as_str();

        log::info!("Navigating to {} for query: {}", self.config.maps_url, query);
        self.page.navigate(&self.config.maps_url)?;
        self.dismiss_consent();

        let handles = FeedLoader::new(&self.page, &self.config).load(query, self.config.max_results)?;

        log::info!("Extracting data...");
        let extractor = RecordExtractor::new(&self.page, &self.config);
        let mut records = Vec::with_capacity(handles.len());
        let mut summary = RunSummary { discovered: handles.len(), ..RunSummary::default() };

        for (position, handle) in handles.iter().enumerate() {
            log::info!("Processing {}/{}...", position + 1, handles.len());
            match extractor.extract(*handle) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping listing: {}", e);
                    summary.failed += 1;
                }
            }
        }

        summary.extracted = records.len();
        summary.without_website = records.iter().filter(|r| !r.has_website()).count();

        Ok((records, summary))
    }

    /// Accept the cookie consent dialog if one is shown
    fn dismiss_consent(&self) {
        let s = &self.config.selectors;
        match self.page.click_role("button", &s.consent_button, self.config.timing.consent_timeout) {
            Ok(()) => log::info!("Accepted cookies."),
            Err(e) => log::debug!("No consent dialog dismissed: {}", e),
        }
    }
}
