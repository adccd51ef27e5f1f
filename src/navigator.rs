use crate::browser::{Locator, Session};
use crate::config::Timings;
use crate::error::ScrapeError;
use crate::wait;
use std::time::Duration;

/// Load `url` and give its asynchronous content time to render.
///
/// With a `ready` locator the settle delay becomes an upper bound on polling
/// for that element; without one the full delay is slept. Either way the
/// page content is not verified here, an element still missing afterwards is
/// left to the extraction steps.
pub fn load(
    session: &(impl Session + ?Sized),
    url: &str,
    ready: Option<&Locator>,
    settle: Duration,
    timings: &Timings,
) -> Result<(), ScrapeError> {
    log::info!("Navigating to {}", url);
    session.navigate(url).map_err(|source| {
        log::error!("Navigation to {} failed: {}", url, source);
        ScrapeError::Navigation {
            url: url.to_string(),
            source,
        }
    })?;

    match ready {
        Some(locator) => {
            if let Err(e) = wait::presence_of(session, locator, None, settle, timings) {
                log::debug!("Page not ready after {:?}: {}", settle, e);
            }
        }
        None => wait::settle(settle),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::SnapshotSession;

    #[test]
    fn test_navigation_failure_is_fatal() {
        let session = SnapshotSession::new();
        let err = load(&session, "https://nowhere.test/", None, Duration::ZERO, &Timings::instant())
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation { ref url, .. } if url == "https://nowhere.test/"));
    }

    #[test]
    fn test_missing_ready_element_is_not_an_error() {
        let session = SnapshotSession::new().with_fallback("<html><body><p>hi</p></body></html>");
        let ready = Locator::css("div.never");
        assert!(load(&session, "https://x.test/", Some(&ready), Duration::ZERO, &Timings::instant()).is_ok());
    }
}
