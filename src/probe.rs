use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Advisory reachability check run before rendering
#[async_trait]
pub trait Probe: Send + Sync {
    /// Returns the HTTP status code of `url`
    async fn probe(&self, url: &str) -> Result<u16>;
}

/// Probes with a HEAD request, falling back to GET once if HEAD can't get a response
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Build a prober whose requests each give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("HTTP istemcisi olusturulamadi: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<u16> {
        head_then_get(
            async {
                let resp = self.client.head(url).send().await?;
                Ok::<u16, reqwest::Error>(resp.status().as_u16())
            },
            || async {
                let resp = self.client.get(url).send().await?;
                Ok::<u16, reqwest::Error>(resp.status().as_u16())
            },
        )
        .await
    }
}

/// Runs `head`; only if it fails at the transport level is `get` tried.
pub(crate) async fn head_then_get<H, G, GF, E>(head: H, get: G) -> Result<u16>
where
    H: Future<Output = std::result::Result<u16, E>>,
    G: FnOnce() -> GF,
    GF: Future<Output = std::result::Result<u16, E>>,
    E: std::fmt::Display,
{
    match head.await {
        Ok(status) => Ok(status),
        Err(head_err) => {
            ::log::debug!("HEAD basarisiz, GET deneniyor: {}", head_err);
            get().await.map_err(|e| Error::Probe(e.to_string()))
        }
    }
}
