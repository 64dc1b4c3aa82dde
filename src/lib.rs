//! Render a single web page in a browser and keep its HTML, a full-page
//! screenshot and its links on disk.
//!
//! The same [`Scraper`] serves the command line and the web front end in
//! [`server`].

pub mod config;
pub mod error;
pub mod pages;
pub mod probe;
pub mod render;
pub mod results;
pub mod scraper;
pub mod server;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::{Error, Result};
pub use results::{RenderedPage, ScrapeResult};
pub use scraper::Scraper;
pub use server::WebServer;
