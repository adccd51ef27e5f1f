use std::fmt;

/// Opaque reference to a live DOM element owned by a [`Session`].
///
/// Handles are only meaningful to the session that produced them. They stay
/// valid across later queries on the same page and until the next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub u32);

/// A concrete CSS selector identifying zero or more elements on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    css: String,
}

impl Locator {
    /// Locate by an arbitrary CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
        }
    }

    /// Locate by element id.
    ///
    /// Attribute form keeps ids with leading digits or dots valid CSS.
    pub fn id(id: &str) -> Self {
        Self {
            css: format!("[id=\"{}\"]", id.replace('"', "\\\"")),
        }
    }

    pub fn as_css(&self) -> &str {
        &self.css
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

/// Browser automation capabilities the extraction engine relies on.
///
/// Implementations are single-threaded and never shared across threads; the
/// engine borrows one session for the whole run and never creates or closes
/// it itself.
pub trait Session {
    /// Issue a full page load for `url`
    fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// All elements matching `locator`, searched under `scope` when given or
    /// across the whole page otherwise. No match is an empty vector.
    fn find_all(
        &self,
        locator: &Locator,
        scope: Option<NodeHandle>,
    ) -> Result<Vec<NodeHandle>, SessionError>;

    /// First element matching `locator`, if any
    fn find_one(
        &self,
        locator: &Locator,
        scope: Option<NodeHandle>,
    ) -> Result<Option<NodeHandle>, SessionError> {
        Ok(self.find_all(locator, scope)?.into_iter().next())
    }

    /// Visible text of the element
    fn text(&self, node: NodeHandle) -> Result<String, SessionError>;

    fn attribute(&self, node: NodeHandle, name: &str) -> Result<Option<String>, SessionError>;

    /// Whether the element is displayed and enabled
    fn is_interactable(&self, node: NodeHandle) -> Result<bool, SessionError>;

    fn scroll_into_view(&self, node: NodeHandle) -> Result<(), SessionError>;

    /// Run a JavaScript function declaration with `this` bound to the element
    fn execute_on(&self, node: NodeHandle, function: &str) -> Result<(), SessionError>;

    fn close(&self) -> Result<(), SessionError>;
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("Stale element handle {0:?}")]
    StaleElement(NodeHandle),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("Element read error: {0}")]
    ReadError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_locator_uses_attribute_selector() {
        let locator = Locator::id("accordion-item-actor-upcoming-projects");
        assert_eq!(
            locator.as_css(),
            "[id=\"accordion-item-actor-upcoming-projects\"]"
        );
    }

    #[test]
    fn test_locator_display() {
        let locator = Locator::css("h3.ipc-title__text");
        assert_eq!(locator.to_string(), "h3.ipc-title__text");
    }
}
