//! The three extraction pipelines
//!
//! Each pipeline navigates, performs its interactions, extracts, assembles a
//! row set and hands it to the sink. A pipeline that fails persists nothing.

pub mod filmography;
pub mod reviews;
pub mod top_list;

use crate::assembler;
use crate::browser::Session;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::persist::RecordSink;
use crate::resolver::AccordionCandidates;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    TopList,
    Filmography,
    Reviews,
}

impl Pipeline {
    pub const ALL: [Pipeline; 3] = [Pipeline::TopList, Pipeline::Filmography, Pipeline::Reviews];
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pipeline::TopList => "top list",
            Pipeline::Filmography => "filmography",
            Pipeline::Reviews => "reviews",
        })
    }
}

/// Scrape the top list at `url` and persist it. Returns the rows written.
pub fn run_top_list(
    session: &(impl Session + ?Sized),
    url: &str,
    config: &Config,
    sink: &mut dyn RecordSink,
) -> Result<usize, ScrapeError> {
    let entries = top_list::scrape(session, url, &config.timings)?;
    let rows = assembler::top_list(entries);
    sink.write(&rows)?;
    Ok(rows.len())
}

pub fn run_filmography(
    session: &(impl Session + ?Sized),
    url: &str,
    config: &Config,
    sink: &mut dyn RecordSink,
) -> Result<usize, ScrapeError> {
    let candidates = AccordionCandidates::new(config.role_aliases.clone());
    let row = filmography::scrape(session, url, &candidates, &config.timings)?;
    let rows = assembler::filmography(row);
    sink.write(&rows)?;
    Ok(rows.len())
}

/// Scrape and persist reviews; an empty result leaves the previous file untouched
pub fn run_reviews(
    session: &(impl Session + ?Sized),
    url: &str,
    max_reviews: usize,
    config: &Config,
    sink: &mut dyn RecordSink,
) -> Result<usize, ScrapeError> {
    let pairing = reviews::Pairing::from_container(config.review_container.as_deref());
    let entries = reviews::scrape(session, url, max_reviews, &pairing, &config.timings)?;
    if entries.is_empty() {
        log::warn!("No reviews were extracted");
        return Ok(0);
    }
    let rows = assembler::reviews(entries);
    sink.write(&rows)?;
    Ok(rows.len())
}

/// Run one pipeline against its configured target
pub fn run(
    pipeline: Pipeline,
    session: &(impl Session + ?Sized),
    config: &Config,
    sink: &mut dyn RecordSink,
) -> Result<usize, ScrapeError> {
    let targets = &config.targets;
    match pipeline {
        Pipeline::TopList => run_top_list(session, &targets.top_list_url, config, sink),
        Pipeline::Filmography => run_filmography(session, &targets.filmography_url, config, sink),
        Pipeline::Reviews => {
            run_reviews(session, &targets.reviews_url, targets.max_reviews, config, sink)
        }
    }
}

/// Run every pipeline in turn on the shared session.
///
/// Pipelines are independent: a failure is logged and the next one still runs.
pub fn run_all(
    session: &(impl Session + ?Sized),
    config: &Config,
    sink: &mut dyn RecordSink,
) -> Vec<(Pipeline, Result<usize, ScrapeError>)> {
    Pipeline::ALL
        .into_iter()
        .map(|pipeline| {
            log::info!("Running {} pipeline", pipeline);
            let outcome = run(pipeline, session, config, sink);
            match &outcome {
                Ok(rows) => log::info!("{} pipeline finished with {} rows", pipeline, rows),
                Err(e) => log::error!("{} pipeline failed: {}", pipeline, e),
            }
            (pipeline, outcome)
        })
        .collect()
}
