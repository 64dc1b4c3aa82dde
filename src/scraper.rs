use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::probe::{HttpProbe, Probe};
use crate::render::{Renderer, WebDriverRenderer};
use crate::results::{ScrapeResult, WrittenArtifacts};
use crate::storage::{ArtifactLayout, ArtifactWriter};
use crate::utils::sanitize_site_name;
use std::sync::Arc;
use std::time::Duration;

/// Probe, render and persist a single page
///
/// The command line and every web request go through [`Scraper::scrape`].
#[derive(Clone)]
pub struct Scraper {
    prober: Arc<dyn Probe>,
    renderer: Arc<dyn Renderer>,
    writer: ArtifactWriter,
}

impl Scraper {
    pub fn new(prober: Arc<dyn Probe>, renderer: Arc<dyn Renderer>, writer: ArtifactWriter) -> Self {
        Self {
            prober,
            renderer,
            writer,
        }
    }

    /// Build a scraper backed by HTTP probing and a WebDriver browser
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let prober = HttpProbe::new(config.probe_timeout())?;
        let renderer = WebDriverRenderer::from_config(config);
        let writer = ArtifactWriter::new(ArtifactLayout::new(&config.output_dir));
        Ok(Self::new(Arc::new(prober), Arc::new(renderer), writer))
    }

    pub fn layout(&self) -> &ArtifactLayout {
        self.writer.layout()
    }

    /// Scrape `url`, giving the browser at most `timeout`
    ///
    /// A failed probe only leaves the status at 0. A failed render returns
    /// early with nothing written. Failed artifact writes are listed in
    /// `write_failures` but do not make the scrape fail.
    pub async fn scrape(&self, url: &str, timeout: Duration) -> ScrapeResult {
        ::log::info!("Hedef URL: {}", url);

        let status_code = match self.prober.probe(url).await {
            Ok(status) => {
                ::log::info!("http status {}", status);
                status
            }
            Err(e) => {
                ::log::warn!("{}", e);
                0
            }
        };

        let site_name = sanitize_site_name(url);

        let page = match self.renderer.render(url, timeout).await {
            Ok(page) => page,
            Err(e) => {
                ::log::error!("sayfa cizilemedi {}: {}", url, e);
                return ScrapeResult::failed(status_code, e);
            }
        };

        let writer = self.writer.clone();
        let written = tokio::task::spawn_blocking(move || writer.persist(&site_name, &page))
            .await
            .unwrap_or_else(|e| {
                ::log::error!("dosya yazma gorevi basarisiz: {}", e);
                WrittenArtifacts {
                    failures: vec![Error::Io(std::io::Error::other(e.to_string()))],
                    ..WrittenArtifacts::default()
                }
            });

        ScrapeResult::completed(status_code, written)
    }
}
