use super::manager::BrowserManager;
use super::session::{Locator, NodeHandle, Session, SessionError};
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::protocol::cdp::DOM;
use headless_chrome::{Element, Tab};
use std::sync::Arc;

const INTERACTABLE_FN: &str = r#"function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return !this.disabled
        && rect.width > 0
        && rect.height > 0
        && style.visibility !== 'hidden'
        && style.display !== 'none';
}"#;

/// Live session over one Chrome tab.
///
/// Handles carry backend node ids. Frontend node ids are dropped by Chrome
/// on every page-wide query (`DOM.getDocument`), backend ids last until the
/// node leaves the page.
pub struct ChromeSession {
    tab: Arc<Tab>,
    // Dropped after the tab; owns the browser process
    _manager: BrowserManager,
}

impl ChromeSession {
    pub(crate) fn new(manager: BrowserManager, tab: Arc<Tab>) -> Self {
        Self {
            tab,
            _manager: manager,
        }
    }

    /// Rebuild the element behind `node` in the current document
    fn element(&self, node: NodeHandle) -> Result<Element<'_>, SessionError> {
        let pushed = self
            .tab
            .call_method(DOM::PushNodesByBackendIdsToFrontend {
                backend_node_ids: vec![node.0],
            })
            .map_err(|e| {
                log::debug!("Element {:?} could not be pushed: {}", node, e);
                SessionError::StaleElement(node)
            })?;

        // Chrome answers 0 for nodes no longer attached to the document
        let node_id = match pushed.node_ids.first() {
            Some(&id) if id != 0 => id,
            _ => return Err(SessionError::StaleElement(node)),
        };

        Element::new(&self.tab, node_id).map_err(|e| {
            log::debug!("Element {:?} no longer resolvable: {}", node, e);
            SessionError::StaleElement(node)
        })
    }
}

impl Session for ChromeSession {
    fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.tab
            .navigate_to(url)
            .map_err(|e| SessionError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| SessionError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    fn find_all(
        &self,
        locator: &Locator,
        scope: Option<NodeHandle>,
    ) -> Result<Vec<NodeHandle>, SessionError> {
        let found = match scope {
            Some(node) => self.element(node)?.find_elements(locator.as_css()),
            None => self.tab.find_elements(locator.as_css()),
        };

        match found {
            Ok(elements) => Ok(elements
                .iter()
                .map(|e| NodeHandle(e.backend_node_id))
                .collect()),
            // headless_chrome reports an empty match set as an error
            Err(e) if e.downcast_ref::<NoElementFound>().is_some() => {
                log::debug!("No elements for '{}'", locator);
                Ok(Vec::new())
            }
            Err(e) => Err(SessionError::ReadError(format!(
                "Query '{}' failed: {}",
                locator, e
            ))),
        }
    }

    fn text(&self, node: NodeHandle) -> Result<String, SessionError> {
        self.element(node)?
            .get_inner_text()
            .map_err(|e| SessionError::ReadError(e.to_string()))
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Result<Option<String>, SessionError> {
        self.element(node)?
            .get_attribute_value(name)
            .map_err(|e| SessionError::ReadError(e.to_string()))
    }

    fn is_interactable(&self, node: NodeHandle) -> Result<bool, SessionError> {
        let result = self
            .element(node)?
            .call_js_fn(INTERACTABLE_FN, vec![], false)
            .map_err(|e| SessionError::JavaScriptError(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    fn scroll_into_view(&self, node: NodeHandle) -> Result<(), SessionError> {
        self.element(node)?
            .scroll_into_view()
            .map_err(|e| SessionError::JavaScriptError(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    fn execute_on(&self, node: NodeHandle, function: &str) -> Result<(), SessionError> {
        self.element(node)?
            .call_js_fn(function, vec![], false)
            .map_err(|e| SessionError::JavaScriptError(e.to_string()))?;
        Ok(())
    }

    fn close(&self) -> Result<(), SessionError> {
        log::info!("Closing browser session");
        self.tab
            .close(true)
            .map_err(|e| SessionError::JavaScriptError(format!("Close failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::BrowserConfig;

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_basic_navigation() {
        let session = BrowserManager::new(BrowserConfig::default())
            .unwrap()
            .open_session()
            .unwrap();

        assert!(session.navigate("https://example.com").is_ok());
    }

    #[test]
    #[ignore] // Requires Chrome to be installed and internet
    fn test_find_and_read() {
        let session = BrowserManager::new(BrowserConfig::default())
            .unwrap()
            .open_session()
            .unwrap();

        session.navigate("https://example.com").unwrap();
        let headings = session.find_all(&Locator::css("h1"), None).unwrap();
        assert_eq!(headings.len(), 1);
        assert!(session.text(headings[0]).unwrap().contains("Example"));
        assert!(session
            .find_all(&Locator::css("div.not-on-this-page"), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    #[ignore] // Requires Chrome to be installed and internet
    fn test_handles_survive_later_queries() {
        let session = BrowserManager::new(BrowserConfig::default())
            .unwrap()
            .open_session()
            .unwrap();

        session.navigate("https://example.com").unwrap();
        let headings = session.find_all(&Locator::css("h1"), None).unwrap();
        let paragraphs = session.find_all(&Locator::css("p"), None).unwrap();
        assert!(!paragraphs.is_empty());
        assert!(session.text(headings[0]).unwrap().contains("Example"));
    }

    #[test]
    #[ignore] // Requires Chrome to be installed and internet
    fn test_query_on_closed_tab_is_an_error() {
        let session = BrowserManager::new(BrowserConfig::default())
            .unwrap()
            .open_session()
            .unwrap();

        session.navigate("https://example.com").unwrap();
        session.close().unwrap();
        assert!(session.find_all(&Locator::css("h1"), None).is_err());
    }
}
