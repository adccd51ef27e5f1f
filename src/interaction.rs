use crate::browser::{Locator, Session, SessionError};
use crate::config::Timings;
use crate::error::ScrapeError;
use crate::wait;

/// Click through the page's script context, immune to overlays covering the control
const SCRIPT_CLICK: &str = "function() { this.click(); }";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Extraction is meaningless without it; failure aborts the pipeline
    Prerequisite,
    /// Failure is logged and extraction continues on the current content
    BestEffort,
}

/// A UI action performed before extraction
#[derive(Debug, Clone)]
pub struct Interaction {
    pub name: String,
    pub control: Locator,
    pub criticality: Criticality,
}

impl Interaction {
    pub fn prerequisite(name: &str, control: Locator) -> Self {
        Self {
            name: name.to_string(),
            control,
            criticality: Criticality::Prerequisite,
        }
    }

    pub fn best_effort(name: &str, control: Locator) -> Self {
        Self {
            name: name.to_string(),
            control,
            criticality: Criticality::BestEffort,
        }
    }

    /// Perform the action, returning whether it happened.
    ///
    /// Only a failed prerequisite is an error.
    pub fn perform(
        &self,
        session: &(impl Session + ?Sized),
        timings: &Timings,
    ) -> Result<bool, ScrapeError> {
        match self.click(session, timings) {
            Ok(()) => {
                log::info!("'{}' clicked successfully", self.name);
                wait::settle(timings.interaction_settle());
                Ok(true)
            }
            Err(source) => {
                log::error!("Unable to click '{}': {}", self.name, source);
                match self.criticality {
                    Criticality::Prerequisite => Err(ScrapeError::Interaction {
                        action: self.name.clone(),
                        source,
                    }),
                    Criticality::BestEffort => {
                        log::warn!("Continuing without '{}'", self.name);
                        Ok(false)
                    }
                }
            }
        }
    }

    fn click(
        &self,
        session: &(impl Session + ?Sized),
        timings: &Timings,
    ) -> Result<(), SessionError> {
        let timeout = timings.interaction_timeout();

        log::info!("Locating '{}'", self.name);
        let control = wait::presence_of(session, &self.control, None, timeout, timings)?;

        // Some backends refuse to act on off-screen elements
        session.scroll_into_view(control)?;

        log::info!("Waiting for '{}' to be clickable", self.name);
        wait::interactable(session, control, timeout, timings)?;

        session.execute_on(control, SCRIPT_CLICK)
    }
}
