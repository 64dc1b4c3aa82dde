use crate::error::Error;
use std::path::{Path, PathBuf};

/// Output of one successful render session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    /// Outer HTML of the document root
    pub html: String,

    /// Full-page screenshot (PNG)
    pub screenshot: Vec<u8>,

    /// `href` of every anchor, in document order
    pub links: Vec<String>,
}

impl RenderedPage {
    /// Create a new rendered page
    pub fn new(html: String, screenshot: Vec<u8>, links: Vec<String>) -> Self {
        Self {
            html,
            screenshot,
            links,
        }
    }
}

/// Paths that were written for a single page, plus the writes that failed
#[derive(Debug, Default)]
pub struct WrittenArtifacts {
    pub html_path: Option<PathBuf>,
    pub screenshot_path: Option<PathBuf>,
    pub urls_path: Option<PathBuf>,
    pub failures: Vec<Error>,
}

impl WrittenArtifacts {
    /// Written paths in write order
    pub fn paths(&self) -> Vec<&Path> {
        [&self.html_path, &self.screenshot_path, &self.urls_path]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect()
    }
}

/// Outcome of one scrape
#[derive(Debug, Default)]
pub struct ScrapeResult {
    /// Probed HTTP status, 0 when unknown
    pub status_code: u16,

    pub html_path: Option<PathBuf>,
    pub screenshot_path: Option<PathBuf>,
    pub urls_path: Option<PathBuf>,

    /// Artifact writes that failed after a successful render
    pub write_failures: Vec<Error>,

    /// Set when rendering failed; nothing was written in that case
    pub error: Option<Error>,
}

impl ScrapeResult {
    pub(crate) fn failed(status_code: u16, error: Error) -> Self {
        Self {
            status_code,
            error: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn completed(status_code: u16, written: WrittenArtifacts) -> Self {
        Self {
            status_code,
            html_path: written.html_path,
            screenshot_path: written.screenshot_path,
            urls_path: written.urls_path,
            write_failures: written.failures,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Paths of the artifacts that were written, in write order
    pub fn paths(&self) -> Vec<&Path> {
        [&self.html_path, &self.screenshot_path, &self.urls_path]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect()
    }
}
