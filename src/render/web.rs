use super::{LINKS_SCRIPT, PAGE_SIZE_SCRIPT, Renderer};
use crate::config::ScraperConfig;
use crate::error::{Error, RenderStep, Result};
use crate::results::RenderedPage;
use async_trait::async_trait;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Value, json};
use std::time::Duration;
use tokio::time::{Instant, timeout, timeout_at};

/// Largest window edge requested for a full-page screenshot
const MAX_WINDOW_EDGE: u32 = 16_384;

/// Grace period for closing a WebDriver session once the render is over
const RELEASE_TIMEOUT: Duration = Duration::from_secs(5);

/// Well-known local WebDriver endpoints tried after the configured one
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Renders pages through a WebDriver server (ChromeDriver, geckodriver, ...)
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
    headless: bool,
}

impl WebDriverRenderer {
    pub fn new(webdriver_url: impl Into<String>, headless: bool) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            headless,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.webdriver_url.clone(), config.headless)
    }
}

#[async_trait]
impl Renderer for WebDriverRenderer {
    async fn render(&self, url: &str, deadline: Duration) -> Result<RenderedPage> {
        let started = Instant::now();
        let expires = started + deadline;

        let session = timeout_at(
            expires,
            BrowserSession::open(&self.webdriver_url, self.headless),
        )
        .await
        .map_err(|_| Error::Timeout(deadline))??;

        // The session stays owned out here so it is released whatever the capture does
        let outcome = match timeout_at(expires, session.capture(url)).await {
            Ok(result) => result,
            Err(_) => {
                ::log::warn!("Render of {} exceeded {:?}", url, deadline);
                Err(Error::Timeout(deadline))
            }
        };

        session.release().await;

        if outcome.is_ok() {
            ::log::debug!(
                "Rendered {} in {:.2} seconds",
                url,
                started.elapsed().as_secs_f64()
            );
        }
        outcome
    }
}

/// One WebDriver session, scoped to a single render
///
/// Obtained with [`BrowserSession::open`] and given back with
/// [`BrowserSession::release`].
pub struct BrowserSession {
    client: Client,
}

impl BrowserSession {
    /// Connects to the WebDriver instance, trying the fallback endpoints if needed
    pub async fn open(webdriver_url: &str, headless: bool) -> Result<Self> {
        let caps = capabilities(headless);

        let first_err = match connect(webdriver_url, &caps).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == webdriver_url {
                continue; // Skip if it's the same as the one we already tried
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = connect(url, &caps).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(Error::Session(first_err))
    }

    /// Runs the render steps in order; the first failing step fails the whole capture
    pub async fn capture(&self, url: &str) -> Result<RenderedPage> {
        let client = &self.client;

        client
            .goto(url)
            .await
            .map_err(|e| Error::render(RenderStep::Navigate, e))?;

        client
            .wait()
            .for_element(Locator::Css("body"))
            .await
            .map_err(|e| Error::render(RenderStep::WaitReady, e))?;

        let html = client
            .find(Locator::Css("html"))
            .await
            .map_err(|e| Error::render(RenderStep::OuterHtml, e))?
            .html(false)
            .await
            .map_err(|e| Error::render(RenderStep::OuterHtml, e))?;

        let screenshot = self.full_page_screenshot().await?;

        let links = client
            .execute(LINKS_SCRIPT, Vec::new())
            .await
            .map_err(|e| Error::render(RenderStep::ExtractLinks, e))
            .and_then(decode_links)?;

        ::log::info!("Found {} links in {}", links.len(), url);

        Ok(RenderedPage::new(html, screenshot, links))
    }

    /// Grows the window to the document size, then takes a PNG screenshot
    async fn full_page_screenshot(&self) -> Result<Vec<u8>> {
        let client = &self.client;

        let size = client
            .execute(PAGE_SIZE_SCRIPT, Vec::new())
            .await
            .map_err(|e| Error::render(RenderStep::Screenshot, e))
            .and_then(decode_page_size)?;

        if let Some((width, height)) = size {
            if let Err(e) = client.set_window_size(width, height).await {
                // Some drivers refuse resizing; a viewport shot is still a valid screenshot
                ::log::warn!("Could not resize window to {}x{}: {}", width, height, e);
            }
        }

        client
            .screenshot()
            .await
            .map_err(|e| Error::render(RenderStep::Screenshot, e))
    }

    /// Ends the WebDriver session
    pub async fn release(self) {
        match timeout(RELEASE_TIMEOUT, self.client.close()).await {
            Ok(Ok(())) => ::log::debug!("WebDriver session closed"),
            Ok(Err(e)) => ::log::warn!("Failed to close WebDriver session: {}", e),
            Err(_) => ::log::warn!("Timed out closing WebDriver session"),
        }
    }
}

async fn connect(webdriver_url: &str, caps: &Capabilities) -> std::result::Result<Client, String> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps.clone());
    builder.connect(webdriver_url).await.map_err(|e| e.to_string())
}

/// Browser capabilities for Chrome and Firefox
pub fn capabilities(headless: bool) -> Capabilities {
    let mut chrome_args = vec!["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"];
    let mut firefox_args = Vec::new();
    if headless {
        chrome_args.push("--headless=new");
        firefox_args.push("-headless");
    }

    let mut caps = Capabilities::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": chrome_args }));
    caps.insert("moz:firefoxOptions".to_string(), json!({ "args": firefox_args }));
    caps
}

/// Decodes the result of [`LINKS_SCRIPT`]
pub fn decode_links(value: Value) -> Result<Vec<String>> {
    serde_json::from_value(value).map_err(|e| Error::render(RenderStep::ExtractLinks, e))
}

/// Decodes the result of [`PAGE_SIZE_SCRIPT`] into the window size that shows
/// the whole document, `None` when the page reports no size
///
/// `set_window_size` sizes the outer window, so the frame around the viewport
/// (toolbars in a headed browser, nothing when headless) is added back.
pub fn decode_page_size(value: Value) -> Result<Option<(u32, u32)>> {
    let [width, height, frame_width, frame_height]: [f64; 4] =
        serde_json::from_value(value).map_err(|e| Error::render(RenderStep::Screenshot, e))?;

    if !(width >= 1.0 && height >= 1.0) {
        return Ok(None);
    }
    let clamp = |v: f64| (v.ceil() as u32).min(MAX_WINDOW_EDGE);
    Ok(Some((
        clamp(width + frame_width.max(0.0)),
        clamp(height + frame_height.max(0.0)),
    )))
}
