use crate::browser::{Locator, Session};
use crate::config::Timings;
use crate::error::ScrapeError;
use crate::extract;
use crate::interaction::Interaction;
use crate::models::FilmographyRow;
use crate::navigator;
use crate::resolver::{self, CandidateSource};
use std::collections::BTreeMap;

pub const EXPAND_BUTTON: &str = "button[data-testid='nm-flmg-all-accordion-expander']";
pub const CREDIT_TITLES: &str = "a.ipc-metadata-list-summary-item__t";

/// Collapsed credits hide every section, so expanding is a prerequisite
pub fn expand_below() -> Interaction {
    Interaction::prerequisite("Expand below", Locator::css(EXPAND_BUTTON))
}

/// Scrape the person page at `url` into one wide row.
///
/// Fails before any extraction when the credits cannot be expanded.
pub fn scrape(
    session: &(impl Session + ?Sized),
    url: &str,
    candidates: &(impl CandidateSource + ?Sized),
    timings: &Timings,
) -> Result<FilmographyRow, ScrapeError> {
    let expand = expand_below();
    navigator::load(session, url, Some(&expand.control), timings.filmography_settle(), timings)?;

    expand.perform(session, timings).map_err(|e| {
        log::error!("Aborting filmography scraping due to error with expand button");
        e
    })?;

    let credit_titles = Locator::css(CREDIT_TITLES);
    let mut results = BTreeMap::new();

    for key in FilmographyRow::keys() {
        let titles = match resolver::resolve_key(session, candidates, &key, timings) {
            Some(container) => {
                let titles = extract::texts_within(session, container.node, &credit_titles);
                log::info!("{} movies found: {:?}", key, titles);
                titles
            }
            None => {
                log::info!("No {} movies found", key);
                Vec::new()
            }
        };
        results.insert(key, titles);
    }

    let row = FilmographyRow::from_results(&results);
    log::info!("Captured role data for {} columns", row.len());
    Ok(row)
}
