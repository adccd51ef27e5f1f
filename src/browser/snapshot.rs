use super::session::{Locator, NodeHandle, Session, SessionError};
use scraper::{ElementRef, Html, Selector};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// Session over saved HTML pages instead of a live browser.
///
/// Pages are static: scripts never run, so interactions succeed without
/// changing the document and every wait resolves on its first probe. Useful
/// for re-extracting from a page saved with the browser's "Save as" and for
/// exercising the pipelines without Chrome.
#[derive(Default)]
pub struct SnapshotSession {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    current: RefCell<Option<Html>>,
}

impl SnapshotSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` when `url` is navigated to
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Serve `html` for every URL without a dedicated page
    pub fn with_fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback = Some(html.into());
        self
    }

    /// Serve the contents of a saved page for every URL
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        log::info!("Loaded snapshot {} ({} bytes)", path.display(), html.len());
        Ok(Self::new().with_fallback(html))
    }

    /// Run `f` against the loaded document with all elements in document order
    fn with_document<T>(
        &self,
        f: impl FnOnce(&Html, &[ElementRef<'_>]) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let current = self.current.borrow();
        let document = current
            .as_ref()
            .ok_or_else(|| SessionError::NavigationError("No page loaded".to_string()))?;
        let elements: Vec<ElementRef<'_>> = document
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();
        f(document, &elements)
    }

    fn with_element<T>(
        &self,
        node: NodeHandle,
        f: impl FnOnce(ElementRef<'_>) -> T,
    ) -> Result<T, SessionError> {
        self.with_document(|_, elements| {
            elements
                .get(node.0 as usize)
                .copied()
                .map(f)
                .ok_or(SessionError::StaleElement(node))
        })
    }
}

impl Session for SnapshotSession {
    fn navigate(&self, url: &str) -> Result<(), SessionError> {
        let html = self
            .pages
            .get(url)
            .or(self.fallback.as_ref())
            .ok_or_else(|| SessionError::NavigationError(format!("No snapshot for {}", url)))?;

        *self.current.borrow_mut() = Some(Html::parse_document(html));
        Ok(())
    }

    fn find_all(
        &self,
        locator: &Locator,
        scope: Option<NodeHandle>,
    ) -> Result<Vec<NodeHandle>, SessionError> {
        let selector = Selector::parse(locator.as_css())
            .map_err(|_| SessionError::InvalidSelector(locator.to_string()))?;

        self.with_document(|document, elements| {
            let matched: Vec<ElementRef<'_>> = match scope {
                Some(node) => elements
                    .get(node.0 as usize)
                    .ok_or(SessionError::StaleElement(node))?
                    .select(&selector)
                    .collect(),
                None => document.select(&selector).collect(),
            };

            Ok(matched
                .iter()
                .filter_map(|m| elements.iter().position(|e| e.id() == m.id()))
                .map(|idx| NodeHandle(idx as u32))
                .collect())
        })
    }

    fn text(&self, node: NodeHandle) -> Result<String, SessionError> {
        self.with_element(node, |el| el.text().collect::<String>())
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Result<Option<String>, SessionError> {
        self.with_element(node, |el| el.value().attr(name).map(str::to_string))
    }

    fn is_interactable(&self, node: NodeHandle) -> Result<bool, SessionError> {
        self.with_element(node, |el| {
            el.value().attr("disabled").is_none() && el.value().attr("hidden").is_none()
        })
    }

    fn scroll_into_view(&self, node: NodeHandle) -> Result<(), SessionError> {
        self.with_element(node, |_| ())
    }

    fn execute_on(&self, node: NodeHandle, _function: &str) -> Result<(), SessionError> {
        self.with_element(node, |el| {
            log::debug!("Snapshot pages are static; script on <{}> skipped", el.value().name())
        })
    }

    fn close(&self) -> Result<(), SessionError> {
        self.current.borrow_mut().take();
        Ok(())
    }
}
