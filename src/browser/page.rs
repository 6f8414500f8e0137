use crate::error::Result;
use std::time::Duration;

/// The browser primitives the lead pipeline needs from a single page.
///
/// Selectors are CSS selectors; `nth` addresses the n-th match in document order.
/// Reads return `Ok(None)` when the element (or attribute) is absent and reserve
/// `Err` for driver-level failures, so callers can tell "missing" from "broken".
pub trait Page {
    /// Navigate to `url` and wait for the load to finish
    fn navigate(&self, url: &str) -> Result<()>;

    /// URL currently shown by the page
    fn current_url(&self) -> Result<String>;

    /// Click the element with ARIA `role` and accessible `name`, waiting up to `timeout` for it
    fn click_role(&self, role: &str, name: &str, timeout: Duration) -> Result<()>;

    /// Focus the element with ARIA `role` and accessible `name` and type `text` into it
    fn fill_role(&self, role: &str, name: &str, text: &str) -> Result<()>;

    /// Press a key on the focused element (e.g. "Enter")
    fn press_key(&self, key: &str) -> Result<()>;

    /// Number of elements currently matching `selector`
    fn count(&self, selector: &str) -> Result<usize>;

    /// Rendered text of the n-th match
    fn inner_text(&self, selector: &str, nth: usize) -> Result<Option<String>>;

    /// Attribute `name` of the n-th match
    fn attribute(&self, selector: &str, nth: usize, name: &str) -> Result<Option<String>>;

    /// Attribute `name` of the first `selector` match inside the n-th `container` match
    fn attribute_within(&self, container: &str, nth: usize, selector: &str, name: &str) -> Result<Option<String>>;

    /// Click the n-th match
    fn click(&self, selector: &str, nth: usize) -> Result<()>;

    /// Scroll the first match to its maximum extent; `Ok(false)` when nothing matched
    fn scroll_to_end(&self, selector: &str) -> Result<bool>;

    /// Block until `selector` matches or `timeout` elapses
    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;
}
