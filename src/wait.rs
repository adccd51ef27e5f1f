//! Bounded polling on page conditions
//!
//! Every wait probes at least once, then keeps probing every poll interval
//! until the condition holds or the timeout elapses. Waits never back off.

use crate::browser::{Locator, NodeHandle, Session, SessionError};
use crate::config::Timings;
use std::thread;
use std::time::{Duration, Instant};

/// Probe until it yields a value.
///
/// A probe error counts as "not yet"; the last one is reported in the
/// timeout message.
pub fn poll_until<T>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: impl FnMut() -> Result<Option<T>, SessionError>,
) -> Result<T, SessionError> {
    let start = Instant::now();
    let mut last_error = None;

    loop {
        match probe() {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => last_error = Some(e),
        }

        if start.elapsed() >= timeout {
            return Err(SessionError::Timeout(match last_error {
                Some(e) => format!("{} (last error: {})", what, e),
                None => what.to_string(),
            }));
        }

        thread::sleep(interval);
    }
}

/// First element matching `locator` under `scope`
pub fn presence_of(
    session: &(impl Session + ?Sized),
    locator: &Locator,
    scope: Option<NodeHandle>,
    timeout: Duration,
    timings: &Timings,
) -> Result<NodeHandle, SessionError> {
    poll_until(
        &format!("presence of '{}'", locator),
        timeout,
        timings.poll_interval(),
        || session.find_one(locator, scope),
    )
}

/// At least one element matching `locator` page-wide, returning all matches
pub fn presence_of_all(
    session: &(impl Session + ?Sized),
    locator: &Locator,
    timeout: Duration,
    timings: &Timings,
) -> Result<Vec<NodeHandle>, SessionError> {
    poll_until(
        &format!("presence of all '{}'", locator),
        timeout,
        timings.poll_interval(),
        || {
            let nodes = session.find_all(locator, None)?;
            Ok(if nodes.is_empty() { None } else { Some(nodes) })
        },
    )
}

pub fn interactable(
    session: &(impl Session + ?Sized),
    node: NodeHandle,
    timeout: Duration,
    timings: &Timings,
) -> Result<(), SessionError> {
    poll_until(
        &format!("element {:?} to become interactable", node),
        timeout,
        timings.poll_interval(),
        || Ok(session.is_interactable(node)?.then_some(())),
    )
}

/// Unconditional settle delay, for content with no observable readiness signal
pub fn settle(delay: Duration) {
    if !delay.is_zero() {
        log::debug!("Settling for {:?}", delay);
        thread::sleep(delay);
    }
}
