use crate::{browser::{config::LaunchOptions, page::Page},
            error::{Result, ScrapeError}};
use headless_chrome::{Browser, Element, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that owns a Chrome/Chromium instance and the single tab the run works in.
///
/// The Chrome process is torn down when the session is dropped, so holding the session in a
/// scope is enough to release it on every exit path.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The one tab every operation runs against
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Long feeds take minutes to paginate; the default 30s idle timeout would kill the browser mid-run
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path;
        launch_opts.user_data_dir = options.user_data_dir;
        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        if let Some(user_agent) = options.user_agent.as_deref() {
            tab.set_user_agent(user_agent, Some("en-US,en;q=0.9"), None)
                .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to set user agent: {}", e)))?;
        }

        log::debug!("Browser launched (headless: {})", options.headless);

        Ok(Self { browser, tab })
    }

    /// Get the tab the session works in
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the working tab; the browser process exits when the session drops
    pub fn close(&self) -> Result<()> {
        self.tab
            .close(false)
            .map_err(|e| ScrapeError::interaction("close", e))?;
        Ok(())
    }

    fn nth_element<'a>(&'a self, selector: &str, nth: usize) -> Result<Element<'a>> {
        let mut elements = self
            .tab
            .find_elements(selector)
            .map_err(|e| ScrapeError::ElementNotFound(format!("Element '{}' not found: {}", selector, e)))?;

        if nth >= elements.len() {
            return Err(ScrapeError::ElementNotFound(format!(
                "Element '{}' #{} not found ({} matches)",
                selector,
                nth,
                elements.len()
            )));
        }

        Ok(elements.swap_remove(nth))
    }

    fn evaluate(&self, js: &str) -> Result<Option<serde_json::Value>> {
        let result = self
            .tab
            .evaluate(js, false)
            .map_err(|e| ScrapeError::EvaluationFailed(e.to_string()))?;

        Ok(result.value.filter(|value| !value.is_null()))
    }

    fn evaluate_string(&self, js: &str) -> Result<Option<String>> {
        Ok(self.evaluate(js)?.and_then(|value| value.as_str().map(str::to_string)))
    }
}

impl Page for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    fn current_url(&self) -> Result<String> {
        Ok(self.tab.get_url())
    }

    fn click_role(&self, role: &str, name: &str, timeout: Duration) -> Result<()> {
        let xpath = role_xpath(role, name);
        let element = self.tab.wait_for_xpath_with_custom_timeout(&xpath, timeout).map_err(|_| {
            ScrapeError::Timeout { what: format!("{} '{}'", role, name), timeout_ms: timeout.as_millis() }
        })?;

        element.click().map_err(|e| ScrapeError::interaction("click", e))?;
        Ok(())
    }

    fn fill_role(&self, role: &str, name: &str, text: &str) -> Result<()> {
        let xpath = role_xpath(role, name);
        let element = self
            .tab
            .find_element_by_xpath(&xpath)
            .map_err(|e| ScrapeError::ElementNotFound(format!("{} '{}' not found: {}", role, name, e)))?;

        element.click().map_err(|e| ScrapeError::interaction("focus", e))?;
        element.type_into(text).map_err(|e| ScrapeError::interaction("fill", e))?;
        Ok(())
    }

    fn press_key(&self, key: &str) -> Result<()> {
        self.tab.press_key(key).map_err(|e| ScrapeError::interaction("press_key", e))?;
        Ok(())
    }

    fn count(&self, selector: &str) -> Result<usize> {
        let js = format!("document.querySelectorAll({}).length", js_string(selector));
        let count = self
            .evaluate(&js)?
            .and_then(|value| value.as_u64().or_else(|| value.as_f64().map(|n| n as u64)))
            .ok_or_else(|| ScrapeError::EvaluationFailed(format!("No count returned for '{}'", selector)))?;

        Ok(count as usize)
    }

    fn inner_text(&self, selector: &str, nth: usize) -> Result<Option<String>> {
        let js = format!(
            r#"
            (function() {{
                const el = document.querySelectorAll({})[{}];
                return el ? el.innerText : null;
            }})()
        "#,
            js_string(selector),
            nth
        );

        self.evaluate_string(&js)
    }

    fn attribute(&self, selector: &str, nth: usize, name: &str) -> Result<Option<String>> {
        let js = format!(
            r#"
            (function() {{
                const el = document.querySelectorAll({})[{}];
                return el ? el.getAttribute({}) : null;
            }})()
        "#,
            js_string(selector),
            nth,
            js_string(name)
        );

        self.evaluate_string(&js)
    }

    fn attribute_within(&self, container: &str, nth: usize, selector: &str, name: &str) -> Result<Option<String>> {
        let js = format!(
            r#"
            (function() {{
                const parent = document.querySelectorAll({})[{}];
                const el = parent ? parent.querySelector({}) : null;
                return el ? el.getAttribute({}) : null;
            }})()
        "#,
            js_string(container),
            nth,
            js_string(selector),
            js_string(name)
        );

        self.evaluate_string(&js)
    }

    fn click(&self, selector: &str, nth: usize) -> Result<()> {
        let element = self.nth_element(selector, nth)?;
        element.click().map_err(|e| ScrapeError::interaction("click", e))?;
        Ok(())
    }

    fn scroll_to_end(&self, selector: &str) -> Result<bool> {
        let js = format!(
            r#"
            (function() {{
                const el = document.querySelector({});
                if (!el) return false;
                el.scrollTop = el.scrollHeight;
                return true;
            }})()
        "#,
            js_string(selector)
        );

        Ok(self.evaluate(&js)?.and_then(|value| value.as_bool()).unwrap_or(false))
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| ScrapeError::Timeout { what: format!("'{}'", selector), timeout_ms: timeout.as_millis() })?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::debug!("Failed to close tab on shutdown: {}", e);
        }
    }
}

/// Quote a string as a JavaScript literal
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Quote a string as an XPath 1.0 literal
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{}'", part)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// XPath matching an element by explicit or implicit ARIA role and accessible name
fn role_xpath(role: &str, name: &str) -> String {
    let implicit = match role {
        "button" => Some("button"),
        "searchbox" | "textbox" => Some("input"),
        "link" => Some("a"),
        _ => None,
    };

    let role_test = match implicit {
        Some(tag) => format!("(@role={} or self::{})", xpath_literal(role), tag),
        None => format!("@role={}", xpath_literal(role)),
    };
    let name = xpath_literal(name);

    format!("//*[{} and (@aria-label={} or normalize-space(.)={})]", role_test, name, name)
}
