use crate::browser::{Locator, NodeHandle, Session, SessionError};
use crate::config::Timings;
use crate::error::ScrapeError;
use crate::extract::{self, clean, strip_ordinal};
use crate::models::TopListEntry;
use crate::navigator;

pub const TITLES: &str = "a.ipc-title-link-wrapper > h3.ipc-title__text";
pub const RATINGS: &str = ".ipc-rating-star--rating";
/// First span of the metadata line is the release year
pub const YEARS: &str = "div.cli-title-metadata > span:first-of-type";

/// Scrape the ranked chart at `url`.
///
/// Titles, ratings and years are three independent page-wide queries paired
/// by position, so the result is as long as the shortest of the three.
pub fn scrape(
    session: &(impl Session + ?Sized),
    url: &str,
    timings: &Timings,
) -> Result<Vec<TopListEntry>, ScrapeError> {
    let titles_locator = Locator::css(TITLES);
    navigator::load(session, url, Some(&titles_locator), timings.top_list_settle(), timings)?;

    let titles = session.find_all(&titles_locator, None)?;
    let ratings = session.find_all(&Locator::css(RATINGS), None)?;
    let years = session.find_all(&Locator::css(YEARS), None)?;
    log::info!(
        "Found {} titles, {} ratings, {} years",
        titles.len(),
        ratings.len(),
        years.len()
    );

    let entries: Vec<TopListEntry> = titles
        .iter()
        .zip(&ratings)
        .zip(&years)
        .enumerate()
        .filter_map(|(idx, ((&title, &rating), &year))| {
            match read_entry(session, title, rating, year) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::error!("Error parsing movie data at position {}: {}", idx + 1, e);
                    None
                }
            }
        })
        .collect();

    log::info!("Extracted {} top list entries", entries.len());
    Ok(entries)
}

fn read_entry(
    session: &(impl Session + ?Sized),
    title: NodeHandle,
    rating: NodeHandle,
    year: NodeHandle,
) -> Result<TopListEntry, SessionError> {
    Ok(TopListEntry {
        title: extract::read_text(session, title, strip_ordinal)?,
        year: extract::read_text(session, year, clean)?,
        rating: extract::read_text(session, rating, clean)?,
    })
}
