//! Web front end
//!
//! `GET /` shows the form, `POST /scrape` runs one scrape inside the request
//! and shows its outcome. Scrape failures are reported in the page body with
//! a 200 response.

use crate::pages::{PageView, render_page};
use crate::scraper::Scraper;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Shared state of the request handlers
#[derive(Clone)]
struct AppState {
    scraper: Arc<Scraper>,
    timeout: Duration,
}

/// Form posted to `/scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeForm {
    #[serde(default)]
    pub url: String,
}

/// HTTP server bound to one address, scraping with one timeout
pub struct WebServer {
    addr: String,
    timeout: Duration,
    scraper: Arc<Scraper>,
}

impl WebServer {
    pub fn new(addr: impl Into<String>, timeout: Duration, scraper: Scraper) -> Self {
        Self {
            addr: addr.into(),
            timeout,
            scraper: Arc::new(scraper),
        }
    }

    /// Build the router for the form and scrape endpoints
    pub fn router(&self) -> Router {
        let state = AppState {
            scraper: Arc::clone(&self.scraper),
            timeout: self.timeout,
        };

        Router::new()
            .route("/", get(index))
            .route("/scrape", post(scrape))
            .with_state(state)
    }

    /// Listen on the configured address until the process is stopped
    pub async fn run(self) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        ::log::info!("Web arayüzü başlatıldı: http://{}", self.addr);
        axum::serve(listener, self.router()).await
    }
}

async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

async fn scrape(
    State(state): State<AppState>,
    form: Result<Form<ScrapeForm>, FormRejection>,
) -> Html<String> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            ::log::warn!("form okunamadi: {}", e);
            return Html(render_page(&PageView::error("Form parse hatası")));
        }
    };

    let url = form.url.trim();
    if url.is_empty() {
        return Html(render_page(&PageView::error("Lütfen bir URL girin")));
    }

    let result = state.scraper.scrape(url, state.timeout).await;
    Html(render_page(&PageView::from_result(&result)))
}
