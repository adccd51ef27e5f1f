// Library interface for imdb_scraper
// The binary and the integration tests both drive the engine through these modules

pub mod assembler;
pub mod browser;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod interaction;
pub mod models;
pub mod navigator;
pub mod persist;
pub mod pipelines;
pub mod resolver;
pub mod server;
pub mod wait;
