/// Resolution and wait behaviour against content that renders late
use imdb_scraper::browser::{Locator, NodeHandle, Session, SessionError, SnapshotSession};
use imdb_scraper::config::Timings;
use imdb_scraper::extract;
use imdb_scraper::resolver::{self, AccordionCandidates, CandidateSource, LogicalKey, Role, Section};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Hides matches for some selectors until they have been queried a number of times
struct LateRenderingSession {
    inner: SnapshotSession,
    pending: RefCell<HashMap<String, usize>>,
    queries: RefCell<Vec<String>>,
}

impl LateRenderingSession {
    fn new(html: &str) -> Self {
        let inner = SnapshotSession::new().with_fallback(html);
        inner.navigate("https://late.test/").unwrap();
        Self {
            inner,
            pending: RefCell::new(HashMap::new()),
            queries: RefCell::new(Vec::new()),
        }
    }

    fn render_after(self, locator: &Locator, queries: usize) -> Self {
        self.pending
            .borrow_mut()
            .insert(locator.as_css().to_string(), queries);
        self
    }
}

impl Session for LateRenderingSession {
    fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.inner.navigate(url)
    }

    fn find_all(
        &self,
        locator: &Locator,
        scope: Option<NodeHandle>,
    ) -> Result<Vec<NodeHandle>, SessionError> {
        self.queries.borrow_mut().push(locator.as_css().to_string());
        if let Some(remaining) = self.pending.borrow_mut().get_mut(locator.as_css()) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(Vec::new());
            }
        }
        self.inner.find_all(locator, scope)
    }

    fn text(&self, node: NodeHandle) -> Result<String, SessionError> {
        self.inner.text(node)
    }

    fn attribute(&self, node: NodeHandle, name: &str) -> Result<Option<String>, SessionError> {
        self.inner.attribute(node, name)
    }

    fn is_interactable(&self, node: NodeHandle) -> Result<bool, SessionError> {
        self.inner.is_interactable(node)
    }

    fn scroll_into_view(&self, node: NodeHandle) -> Result<(), SessionError> {
        self.inner.scroll_into_view(node)
    }

    fn execute_on(&self, node: NodeHandle, function: &str) -> Result<(), SessionError> {
        self.inner.execute_on(node, function)
    }

    fn close(&self) -> Result<(), SessionError> {
        self.inner.close()
    }
}

const BOTH_VARIANTS: &str = r#"<html><body>
    <div id="accordion-item-actor-upcoming-projects"><a class="t">Actor credit</a></div>
    <div id="accordion-item-actress-upcoming-projects"><a class="t">Actress credit</a></div>
</body></html>"#;

fn timings(resolve_ms: u64) -> Timings {
    Timings {
        poll_interval_ms: 1,
        resolve_timeout_ms: resolve_ms,
        ..Timings::instant()
    }
}

fn candidates() -> AccordionCandidates {
    let mut aliases = BTreeMap::new();
    aliases.insert("actor".to_string(), vec!["actor".to_string(), "actress".to_string()]);
    AccordionCandidates::new(aliases)
}

#[test]
fn test_late_first_candidate_still_wins() {
    let key = LogicalKey::new(Role::Actor, Section::Upcoming);
    let first = candidates().candidates(&key)[0].clone();
    let session = LateRenderingSession::new(BOTH_VARIANTS).render_after(&first, 5);

    let resolved = resolver::resolve_key(&session, &candidates(), &key, &timings(1_000)).unwrap();
    assert_eq!(resolved.locator, first);
    assert_eq!(
        extract::texts_within(&session, resolved.node, &Locator::css("a.t")),
        vec!["Actor credit"]
    );

    // The second candidate was never queried
    let queries = session.queries.borrow();
    assert!(queries.iter().all(|q| q == first.as_css() || q == "a.t"));
}

#[test]
fn test_falls_through_to_later_candidate() {
    let html = r#"<div id="accordion-item-actress-upcoming-projects"><a class="t">Actress credit</a></div>"#;
    let session = LateRenderingSession::new(html);
    let key = LogicalKey::new(Role::Actor, Section::Upcoming);

    let resolved = resolver::resolve_key(&session, &candidates(), &key, &timings(20)).unwrap();
    assert_eq!(
        resolved.locator,
        Locator::id("accordion-item-actress-upcoming-projects")
    );
}

#[test]
fn test_each_candidate_gets_its_own_wait() {
    let session = LateRenderingSession::new("<html><body></body></html>");
    let key = LogicalKey::new(Role::Actor, Section::Previous);

    let start = Instant::now();
    let resolved = resolver::resolve_key(&session, &candidates(), &key, &timings(40));
    assert!(resolved.is_none());
    assert!(start.elapsed() >= Duration::from_millis(80));
}

#[test]
fn test_content_rendering_after_budget_is_not_found() {
    let key = LogicalKey::new(Role::Producer, Section::Upcoming);
    let html = r#"<div id="accordion-item-producer-upcoming-projects"></div>"#;
    let locator = candidates().candidates(&key)[0].clone();
    let session = LateRenderingSession::new(html).render_after(&locator, 1_000_000);

    assert!(resolver::resolve_key(&session, &candidates(), &key, &timings(10)).is_none());
}
