use crate::browser::{Locator, NodeHandle, Session, SessionError};
use crate::config::Timings;
use crate::error::ScrapeError;
use crate::extract::{self, clean};
use crate::interaction::Interaction;
use crate::models::ReviewEntry;
use crate::navigator;
use crate::wait;

pub const HIDE_SPOILERS: &str = "input[aria-label='Hide spoilers']";
pub const TITLES: &str =
    "div[data-testid='review-summary'] a.ipc-title-link-wrapper h3.ipc-title__text";
pub const BODIES: &str = "div.ipc-html-content-inner-div[role='presentation']";
/// Review title relative to its own review container
pub const SCOPED_TITLE: &str = "a.ipc-title-link-wrapper h3.ipc-title__text";

/// How review titles are matched with review bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// Two page-wide queries zipped by position. Misaligns silently when
    /// one list renders partially or in a different order.
    Positional,
    /// Title and body read from the same per-review container; a missing
    /// part becomes an empty string
    Scoped(Locator),
}

impl Pairing {
    pub fn from_container(container: Option<&str>) -> Self {
        match container {
            Some(css) => Pairing::Scoped(Locator::css(css)),
            None => Pairing::Positional,
        }
    }
}

/// Spoilers only change which reviews are shown, so toggling is best-effort
pub fn hide_spoilers() -> Interaction {
    Interaction::best_effort("Hide spoilers", Locator::css(HIDE_SPOILERS))
}

/// Scrape at most `max_reviews` reviews from `url`.
///
/// Reviews that never render within the wait budget give an empty list.
pub fn scrape(
    session: &(impl Session + ?Sized),
    url: &str,
    max_reviews: usize,
    pairing: &Pairing,
    timings: &Timings,
) -> Result<Vec<ReviewEntry>, ScrapeError> {
    let titles = Locator::css(TITLES);
    let ready = match pairing {
        Pairing::Positional => &titles,
        Pairing::Scoped(container) => container,
    };
    navigator::load(session, url, Some(ready), timings.reviews_settle(), timings)?;

    hide_spoilers().perform(session, timings)?;

    let reviews = match pairing {
        Pairing::Positional => positional(session, &titles, max_reviews, timings),
        Pairing::Scoped(container) => scoped(session, container, max_reviews, timings),
    };
    Ok(reviews)
}

fn positional(
    session: &(impl Session + ?Sized),
    titles: &Locator,
    max_reviews: usize,
    timings: &Timings,
) -> Vec<ReviewEntry> {
    log::info!("Waiting for review title elements to be present");
    let title_nodes = match wait::presence_of_all(session, titles, timings.review_wait(), timings) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("Error extracting reviews: {}", e);
            return Vec::new();
        }
    };
    log::info!("Review title elements found: {}", title_nodes.len());

    // Bodies may load after the titles; queried once the titles are in
    let body_nodes = match session.find_all(&Locator::css(BODIES), None) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("Error extracting reviews: {}", e);
            return Vec::new();
        }
    };
    log::info!("Review text elements found: {}", body_nodes.len());

    title_nodes
        .iter()
        .zip(&body_nodes)
        .take(max_reviews)
        .enumerate()
        .filter_map(|(idx, (&title, &body))| {
            log_outcome(idx, read_pair(session, title, body))
        })
        .collect()
}

fn scoped(
    session: &(impl Session + ?Sized),
    container: &Locator,
    max_reviews: usize,
    timings: &Timings,
) -> Vec<ReviewEntry> {
    log::info!("Waiting for review containers '{}'", container);
    let containers = match wait::presence_of_all(session, container, timings.review_wait(), timings) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("Error extracting reviews: {}", e);
            return Vec::new();
        }
    };
    log::info!("Review containers found: {}", containers.len());

    let title = Locator::css(SCOPED_TITLE);
    let body = Locator::css(BODIES);
    containers
        .iter()
        .take(max_reviews)
        .enumerate()
        .filter_map(|(idx, &node)| {
            let entry = extract::first_text_within(session, node, &title).and_then(|heading| {
                Ok(ReviewEntry {
                    title: heading,
                    text: extract::first_text_within(session, node, &body)?,
                })
            });
            log_outcome(idx, entry)
        })
        .collect()
}

fn read_pair(
    session: &(impl Session + ?Sized),
    title: NodeHandle,
    body: NodeHandle,
) -> Result<ReviewEntry, SessionError> {
    Ok(ReviewEntry {
        title: extract::read_text(session, title, clean)?,
        text: extract::read_text(session, body, clean)?,
    })
}

fn log_outcome(idx: usize, entry: Result<ReviewEntry, SessionError>) -> Option<ReviewEntry> {
    match entry {
        Ok(entry) => {
            log::info!("Extracted review {}: {}", idx + 1, entry.title);
            Some(entry)
        }
        Err(e) => {
            log::error!("Skipping review {}: {}", idx + 1, e);
            None
        }
    }
}
