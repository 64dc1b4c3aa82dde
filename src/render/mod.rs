pub mod web;

use crate::error::Result;
use crate::results::RenderedPage;
use async_trait::async_trait;
use std::time::Duration;

pub use web::{BrowserSession, WebDriverRenderer};

/// Script collecting the href of every anchor, in document order
pub const LINKS_SCRIPT: &str = "return Array.from(document.querySelectorAll('a')).map(a => a.href);";

/// Script measuring the full scrollable size of the document, followed by
/// the space the browser frame takes around the viewport
pub const PAGE_SIZE_SCRIPT: &str = "const d = document.documentElement; \
     const b = document.body || d; \
     return [Math.max(d.scrollWidth, b.scrollWidth), Math.max(d.scrollHeight, b.scrollHeight), \
     Math.max(0, window.outerWidth - window.innerWidth), Math.max(0, window.outerHeight - window.innerHeight)];";

/// Renders a page in a browser and captures its artifacts
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders `url`, giving up once `deadline` has elapsed
    async fn render(&self, url: &str, deadline: Duration) -> Result<RenderedPage>;
}
