//! Message dispatch - commit the message once the page is ready
//!
//! Exactly one of two paths runs per call: type-and-submit through the
//! compose box, or a click on the direct send control when the chat
//! opened with the draft already prefilled.

use crate::error::{Error, Result};
use crate::page::{find_visible, PageSurface, COMPOSE_SELECTORS, SEND_BUTTON};
use tracing::{debug, warn};

/// Send `text` through the page.
///
/// The compose box is re-located here rather than carried over from the
/// readiness probe: the UI can shift between detection and action, and a
/// stale handle is worse than a second lookup. If the box holds leftover
/// draft text from an earlier aborted run, the new text is not typed on
/// top of it; the existing draft is submitted as-is and a warning is
/// logged. Neither surface actionable means the UI changed under us -
/// that is a hard failure, not retried.
pub fn send_message(page: &dyn PageSurface, text: &str) -> Result<()> {
    if let Some(selector) = find_visible(page, COMPOSE_SELECTORS)? {
        debug!("Dispatching via compose box {}", selector);
        page.click(selector)?;

        let current = page.read_text(selector)?;
        if current.trim().is_empty() {
            page.type_text(text)?;
        } else {
            warn!("Compose box already holds a draft; submitting it unchanged");
        }

        page.press_submit()?;
        return Ok(());
    }

    if page.is_visible(SEND_BUTTON)? {
        debug!("Dispatching via send button");
        page.click(SEND_BUTTON)?;
        return Ok(());
    }

    Err(Error::DispatchFailed)
}
