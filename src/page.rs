//! Page capability seam
//!
//! The readiness and dispatch logic never talks to a browser directly.
//! It sees the page through this trait: visibility probes plus a handful
//! of input gestures. The real implementation lives in `browser`; tests
//! drive a scripted fake.

use crate::error::Result;

/// What the state machine is allowed to do with a page
pub trait PageSurface {
    /// Is any element matching the selector currently visible?
    fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Click the first element matching the selector
    fn click(&self, selector: &str) -> Result<()>;

    /// Read the text content of the first element matching the selector
    fn read_text(&self, selector: &str) -> Result<String>;

    /// Type into whichever element currently holds focus
    fn type_text(&self, text: &str) -> Result<()>;

    /// Press the submit key (Enter)
    fn press_submit(&self) -> Result<()>;
}

/// Direct send control, shown when a chat is open with a prefilled draft
pub const SEND_BUTTON: &str = "span[data-icon='send']";

/// Known compose-box variants, tried in order. WhatsApp Web has shipped
/// several of these across UI revisions.
pub const COMPOSE_SELECTORS: &[&str] = &[
    "div[data-testid='conversation-compose-box-input']",
    "div[contenteditable='true'][data-tab='10']",
    "div[contenteditable='true'][data-tab='6']",
];

/// Login-challenge indicators shown before the session is established
pub const QR_SELECTORS: &[&str] = &[
    "div[data-testid='qrcode']",
    "canvas[aria-label*='Scan']",
];

/// First selector from the list that reports visible, if any
pub fn find_visible<'a>(
    page: &dyn PageSurface,
    selectors: &[&'a str],
) -> Result<Option<&'a str>> {
    for selector in selectors {
        if page.is_visible(selector)? {
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted page fake for deterministic state-machine tests

    use super::PageSurface;
    use crate::error::Result;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    pub struct FakePage {
        visible: RefCell<HashSet<String>>,
        text: RefCell<HashMap<String, String>>,
        pub clicks: RefCell<Vec<String>>,
        pub typed: RefCell<Vec<String>>,
        pub submits: RefCell<u32>,
    }

    impl FakePage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn show(&self, selector: &str) {
            self.visible.borrow_mut().insert(selector.to_string());
        }

        pub fn set_text(&self, selector: &str, text: &str) {
            self.text
                .borrow_mut()
                .insert(selector.to_string(), text.to_string());
        }
    }

    impl PageSurface for FakePage {
        fn is_visible(&self, selector: &str) -> Result<bool> {
            Ok(self.visible.borrow().contains(selector))
        }

        fn click(&self, selector: &str) -> Result<()> {
            self.clicks.borrow_mut().push(selector.to_string());
            Ok(())
        }

        fn read_text(&self, selector: &str) -> Result<String> {
            Ok(self
                .text
                .borrow()
                .get(selector)
                .cloned()
                .unwrap_or_default())
        }

        fn type_text(&self, text: &str) -> Result<()> {
            self.typed.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn press_submit(&self) -> Result<()> {
            *self.submits.borrow_mut() += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::FakePage;

    #[test]
    fn test_find_visible_order() {
        let page = FakePage::new();
        page.show(COMPOSE_SELECTORS[1]);
        page.show(COMPOSE_SELECTORS[2]);

        let found = find_visible(&page, COMPOSE_SELECTORS).unwrap();
        assert_eq!(found, Some(COMPOSE_SELECTORS[1]));
    }

    #[test]
    fn test_find_visible_none() {
        let page = FakePage::new();
        assert_eq!(find_visible(&page, COMPOSE_SELECTORS).unwrap(), None);
    }

    #[test]
    fn test_selector_lists_nonempty() {
        assert!(!COMPOSE_SELECTORS.is_empty());
        assert!(!QR_SELECTORS.is_empty());
        assert!(SEND_BUTTON.contains("send"));
    }
}
