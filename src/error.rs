use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The three files a scrape can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Html,
    Screenshot,
    Urls,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Html => "html",
            ArtifactKind::Screenshot => "ekran goruntusu",
            ArtifactKind::Urls => "urller",
        };
        f.write_str(name)
    }
}

/// Browser steps of a render session, used to say where a render broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Navigate,
    WaitReady,
    OuterHtml,
    Screenshot,
    ExtractLinks,
}

impl fmt::Display for RenderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStep::Navigate => "sayfaya gidilemedi",
            RenderStep::WaitReady => "body beklenemedi",
            RenderStep::OuterHtml => "html alinamadi",
            RenderStep::Screenshot => "ekran goruntusu alinamadi",
            RenderStep::ExtractLinks => "linkler toplanamadi",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("status kodu alinamadi: {0}")]
    Probe(String),

    #[error("WebDriver oturumu acilamadi: {0}")]
    Session(String),

    #[error("{step}: {reason}")]
    Render { step: RenderStep, reason: String },

    #[error("zaman asimi: islem {0:?} icinde tamamlanamadi")]
    Timeout(Duration),

    #[error("{artifact} kaydedilemedi {}: {source}", .path.display())]
    Persist {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Klasörler oluşturulamadı {}: {source}", .path.display())]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("gecersiz ayar: {0}")]
    Config(String),

    #[error("IO hatasi: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn render(step: RenderStep, reason: impl fmt::Display) -> Self {
        Error::Render {
            step,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
