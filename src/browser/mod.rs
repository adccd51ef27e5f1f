//! Browser automation sessions for JavaScript-rendered pages
//!
//! The extraction engine only talks to the [`Session`] trait. Two
//! implementations ship with the crate: [`ChromeSession`] drives a headless
//! Chrome tab, [`SnapshotSession`] answers the same queries from saved HTML.
//!
//! # Example
//!
//! ```no_run
//! use imdb_scraper::browser::{BrowserConfig, BrowserManager, Locator, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = BrowserManager::new(BrowserConfig::default())?.open_session()?;
//!
//! session.navigate("https://example.com")?;
//! let headings = session.find_all(&Locator::css("h1"), None)?;
//! for heading in headings {
//!     println!("{}", session.text(heading)?);
//! }
//! session.close()?;
//! # Ok(())
//! # }
//! ```

pub mod chrome;
pub mod config;
pub mod manager;
pub mod session;
pub mod snapshot;

// Re-export main types for convenience
pub use chrome::ChromeSession;
pub use config::BrowserConfig;
pub use manager::BrowserManager;
pub use session::{Locator, NodeHandle, Session, SessionError};
pub use snapshot::SnapshotSession;
