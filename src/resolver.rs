//! Logical entity -> live container resolution
//!
//! The site renders equivalent content under different identifiers (an
//! actor's credits live under either an "actor" or an "actress" accordion).
//! A [`CandidateSource`] turns a logical key into an ordered list of concrete
//! locators and [`resolve`] accepts the first one present in the page.

use crate::browser::{Locator, NodeHandle, Session};
use crate::config::Timings;
use crate::wait;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Producer,
    Actor,
    Writer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Upcoming,
    Previous,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Producer, Role::Actor, Role::Writer];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Producer => "Producer",
            Role::Actor => "Actor",
            Role::Writer => "Writer",
        }
    }
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Upcoming, Section::Previous];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Upcoming => "Upcoming",
            Section::Previous => "Previous",
        }
    }
}

/// A (role, section) extraction target, independent of its on-page identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalKey {
    pub role: Role,
    pub section: Section,
}

impl LogicalKey {
    pub fn new(role: Role, section: Section) -> Self {
        Self { role, section }
    }
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.role.label(), self.section.label())
    }
}

/// Ordered concrete locators that may represent a logical key
pub trait CandidateSource {
    fn candidates(&self, key: &LogicalKey) -> Vec<Locator>;
}

/// Filmography accordions: `accordion-item-<category>-<section>-projects`,
/// where a role may be filed under several categories
#[derive(Debug, Clone, Default)]
pub struct AccordionCandidates {
    aliases: BTreeMap<String, Vec<String>>,
}

impl AccordionCandidates {
    pub fn new(aliases: BTreeMap<String, Vec<String>>) -> Self {
        Self { aliases }
    }

    fn categories(&self, role: Role) -> Vec<String> {
        let slug = role.label().to_lowercase();
        match self.aliases.get(&slug) {
            Some(labels) if !labels.is_empty() => {
                labels.iter().map(|l| l.to_lowercase()).collect()
            }
            _ => vec![slug],
        }
    }
}

impl CandidateSource for AccordionCandidates {
    fn candidates(&self, key: &LogicalKey) -> Vec<Locator> {
        let section = key.section.label().to_lowercase();
        self.categories(key.role)
            .iter()
            .map(|category| Locator::id(&format!("accordion-item-{}-{}-projects", category, section)))
            .collect()
    }
}

/// A container located for a logical entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub node: NodeHandle,
    pub locator: Locator,
}

/// Try each candidate in order, each with its own presence wait, and return
/// the first that appears. `None` means the entity is absent from this page.
pub fn resolve(
    session: &(impl Session + ?Sized),
    candidates: &[Locator],
    timings: &Timings,
) -> Option<Resolved> {
    for locator in candidates {
        log::info!("Attempting to locate container: {}", locator);
        match wait::presence_of(session, locator, None, timings.resolve_timeout(), timings) {
            Ok(node) => {
                log::info!("Container located: {}", locator);
                return Some(Resolved {
                    node,
                    locator: locator.clone(),
                });
            }
            Err(e) => {
                log::info!("Container '{}' not found ({}), trying next option if any", locator, e);
            }
        }
    }
    None
}

pub fn resolve_key(
    session: &(impl Session + ?Sized),
    source: &(impl CandidateSource + ?Sized),
    key: &LogicalKey,
    timings: &Timings,
) -> Option<Resolved> {
    resolve(session, &source.candidates(key), timings)
}
