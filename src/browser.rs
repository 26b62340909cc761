//! Real page implementation over a persistent Chrome profile
//!
//! Launches a headed Chrome with a dedicated user-data directory so the
//! WhatsApp Web session (cookies, IndexedDB) survives between runs, and
//! exposes the open tab through the `PageSurface` seam.

use crate::config::NAVIGATION_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::page::PageSurface;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the WhatsApp Web send link with the message prefilled
pub fn send_url(phone: &str, text: &str) -> String {
    let mut url =
        url::Url::parse("https://web.whatsapp.com/send").expect("static base URL parses");
    url.query_pairs_mut()
        .append_pair("phone", phone)
        .append_pair("text", text);
    url.to_string()
}

/// An open WhatsApp Web tab
pub struct WhatsAppPage {
    tab: Arc<Tab>,
}

/// Launch Chrome on the given profile and navigate to `url`.
///
/// The returned `Browser` must stay alive for as long as the page is
/// used; dropping it closes Chrome.
pub fn open_session(profile_dir: &Path, url: &str) -> Result<(Browser, WhatsAppPage)> {
    std::fs::create_dir_all(profile_dir)?;

    info!("Launching Chrome with profile {}", profile_dir.display());
    let options = LaunchOptions::default_builder()
        // Headed: the operator may need to scan the login QR code
        .headless(false)
        .sandbox(false) // Required in containers / CI
        .user_data_dir(Some(profile_dir.to_path_buf()))
        .idle_browser_timeout(Duration::from_secs(600))
        .build()
        .map_err(|e| Error::Browser(format!("launch options: {}", e)))?;

    let browser = Browser::new(options).map_err(|e| {
        Error::Browser(format!(
            "Failed to launch Chrome/Chromium: {}. Make sure Chrome or Chromium is installed.",
            e
        ))
    })?;

    let tab = browser
        .new_tab()
        .map_err(|e| Error::Browser(format!("open tab: {}", e)))?;
    tab.set_default_timeout(Duration::from_secs(NAVIGATION_TIMEOUT_SECS));

    tab.navigate_to(url)
        .and_then(|t| t.wait_until_navigated())
        .map_err(|_| {
            Error::Browser(
                "Navigation timed out. If this repeats, clear the session with --clear and retry."
                    .to_string(),
            )
        })?;

    Ok((browser, WhatsAppPage { tab }))
}

impl WhatsAppPage {
    /// Visibility probe evaluated in the page: the element must exist
    /// and occupy layout space.
    fn probe_expression(selector: &str) -> String {
        let quoted = serde_json::to_string(selector).unwrap_or_default();
        format!(
            "(() => {{ const el = document.querySelector({}); \
             return !!(el && el.getClientRects().length > 0); }})()",
            quoted
        )
    }
}

impl PageSurface for WhatsAppPage {
    fn is_visible(&self, selector: &str) -> Result<bool> {
        let result = self
            .tab
            .evaluate(&Self::probe_expression(selector), false)
            .map_err(|e| Error::Browser(format!("visibility probe: {}", e)))?;

        Ok(result
            .value
            .as_ref()
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .and_then(|el| el.click().map(|_| ()))
            .map_err(|e| Error::Browser(format!("click {}: {}", selector, e)))
    }

    fn read_text(&self, selector: &str) -> Result<String> {
        self.tab
            .find_element(selector)
            .and_then(|el| el.get_inner_text())
            .map_err(|e| Error::Browser(format!("read {}: {}", selector, e)))
    }

    fn type_text(&self, text: &str) -> Result<()> {
        self.tab
            .type_str(text)
            .map(|_| ())
            .map_err(|e| Error::Browser(format!("type: {}", e)))
    }

    fn press_submit(&self) -> Result<()> {
        self.tab
            .press_key("Enter")
            .map(|_| ())
            .map_err(|e| Error::Browser(format!("submit: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_url_encoding() {
        let url = send_url("15551234567", "hello world & good morning");
        assert!(url.starts_with("https://web.whatsapp.com/send?"));
        assert!(url.contains("phone=15551234567"));
        assert!(url.contains("text=hello+world+%26+good+morning"));
    }

    #[test]
    fn test_send_url_unicode() {
        let url = send_url("447911123456", "café ☕");
        assert!(url.contains("phone=447911123456"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_probe_expression_escapes_selector() {
        let expr = WhatsAppPage::probe_expression("span[data-icon='send']");
        assert!(expr.contains(r#""span[data-icon='send']""#));
        assert!(expr.contains("getClientRects"));
    }
}
