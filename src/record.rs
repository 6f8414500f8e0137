use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel written in place of a missing website
pub const NO_WEBSITE: &str = "NO WEBSITE";

/// Fallback business name when neither the detail heading nor the card label is readable
pub const UNKNOWN_BUSINESS: &str = "Unknown";

/// A business website, or the confirmed absence of one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Website {
    Listed(String),
    Missing,
}

impl Website {
    /// Build from a raw `href`; blank or absent values become [`Website::Missing`]
    pub fn from_href(href: Option<String>) -> Self {
        match href.map(|h| h.trim().to_string()) {
            Some(h) if !h.is_empty() => Self::Listed(h),
            _ => Self::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Listed(url) => url,
            Self::Missing => NO_WEBSITE,
        }
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Website {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One extracted business lead. Field names serialize as the export column headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRecord {
    #[serde(rename = "Business Name")]
    pub business_name: String,

    #[serde(rename = "Address")]
    pub address: Option<String>,

    #[serde(rename = "Phone Number")]
    pub phone_number: Option<String>,

    #[serde(rename = "Website")]
    pub website: Website,

    #[serde(rename = "Rating")]
    pub rating: Option<f64>,

    #[serde(rename = "Reviews")]
    pub review_count: u32,

    #[serde(rename = "Search Query")]
    pub source_query: String,

    #[serde(rename = "Google Maps URL")]
    pub source_url: String,
}

impl LeadRecord {
    /// Column headers in export order
    pub const COLUMNS: [&'static str; 8] = [
        "Business Name",
        "Address",
        "Phone Number",
        "Website",
        "Rating",
        "Reviews",
        "Search Query",
        "Google Maps URL",
    ];

    pub fn has_website(&self) -> bool {
        !self.website.is_missing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(website: Website) -> LeadRecord {
        LeadRecord {
            business_name: "Joe's Plumbing".to_string(),
            address: Some("123 Main St".to_string()),
            phone_number: None,
            website,
            rating: Some(4.8),
            review_count: 150,
            source_query: "Plumbers in Miami".to_string(),
            source_url: "https://www.google.com/maps/place/joes".to_string(),
        }
    }

    #[test]
    fn test_website_from_href() {
        assert_eq!(Website::from_href(Some("https://joes.com".to_string())), Website::Listed("https://joes.com".to_string()));
        assert_eq!(Website::from_href(Some("  ".to_string())), Website::Missing);
        assert_eq!(Website::from_href(None), Website::Missing);
    }

    #[test]
    fn test_website_display() {
        assert_eq!(Website::Missing.to_string(), NO_WEBSITE);
        assert_eq!(Website::Listed("https://joes.com".to_string()).to_string(), "https://joes.com");
    }

    #[test]
    fn test_serialization_uses_column_names() {
        let json = serde_json::to_value(record(Website::Missing)).unwrap();

        assert_eq!(json["Business Name"], "Joe's Plumbing");
        assert_eq!(json["Website"], "NO WEBSITE");
        assert_eq!(json["Reviews"], 150);
        assert!(json["Phone Number"].is_null());

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for column in LeadRecord::COLUMNS {
            assert!(keys.contains(&column), "missing column {}", column);
        }
    }

    #[test]
    fn test_has_website() {
        assert!(!record(Website::Missing).has_website());
        assert!(record(Website::Listed("https://joes.com".to_string())).has_website());
    }
}
