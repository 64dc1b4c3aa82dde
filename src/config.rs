use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration shared by the command line and the web front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Address the web front end listens on
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Deadline for one render session, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout for each reachability probe request, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Ask the browser to run without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Directory holding data/, screenshot/ and urls/
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Default value for addr
fn default_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    30
}

/// Default value for probe_timeout_secs
fn default_probe_timeout_secs() -> u64 {
    10
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            timeout_secs: default_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            output_dir: default_output_dir(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Override the WebDriver URL with the WEBDRIVER_URL environment variable if provided
    pub fn apply_env(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout sifir olamaz".to_string()));
        }
        if self.probe_timeout_secs == 0 {
            return Err(Error::Config("probe timeout sifir olamaz".to_string()));
        }
        Url::parse(&self.webdriver_url)
            .map_err(|e| Error::Config(format!("webdriver_url {}: {}", self.webdriver_url, e)))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
