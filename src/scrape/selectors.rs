/// Locations of everything the scraper reads or drives on the Maps page.
///
/// Maps markup changes without notice, so every locator lives here rather than inline.
#[derive(Debug, Clone, PartialEq)]
pub struct Selectors {
    /// Accessible name of the consent dialog's accept button
    pub consent_button: String,
    /// Accessible name of the search input (role "searchbox")
    pub search_box: String,
    /// Scrollable results container
    pub feed: String,
    /// One materialized result card inside the feed
    pub listing: String,
    /// Link overlaying a card, relative to the card; carries the business name as `aria-label`
    pub listing_link: String,
    /// Business name heading in the detail panel
    pub detail_heading: String,
    /// Address control; `aria-label` is "Address: ..."
    pub address: String,
    /// Phone control; `aria-label` is "Phone: ..."
    pub phone: String,
    /// Website link; `href` is the business site
    pub website: String,
    /// Combined rating/review count fragment, e.g. "4.8(150)"
    pub rating: String,
}

/// Label prefix stripped from the address control's accessible name
pub const ADDRESS_PREFIX: &str = "Address: ";

/// Label prefix stripped from the phone control's accessible name
pub const PHONE_PREFIX: &str = "Phone: ";

impl Default for Selectors {
    fn default() -> Self {
        Self {
            consent_button: "Accept all".to_string(),
            search_box: "Search Google Maps".to_string(),
            feed: r#"div[role="feed"]"#.to_string(),
            listing: "div.Nv2PK".to_string(),
            listing_link: "a.hfpxzc".to_string(),
            detail_heading: "h1.DUwDvf".to_string(),
            address: r#"button[data-item-id="address"]"#.to_string(),
            phone: r#"button[data-item-id^="phone"]"#.to_string(),
            website: r#"a[data-item-id="authority"]"#.to_string(),
            rating: "div.F7nice".to_string(),
        }
    }
}
