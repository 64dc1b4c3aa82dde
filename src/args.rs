use clap::Parser;
use snap_page::ScraperConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snap-page")]
#[command(about = "Renders a web page and saves its HTML, a screenshot and its links")]
#[command(version)]
pub struct Args {
    /// Page to scrape
    pub url: Option<String>,

    /// Start the web interface instead of scraping once
    #[arg(long)]
    pub serve: bool,

    /// Address for the web interface
    #[arg(long)]
    pub addr: Option<String>,

    /// Render timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// WebDriver endpoint (ChromeDriver, geckodriver)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Directory that holds data/, screenshot/ and urls/
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Merge the flags over `config`; flags win
    pub fn apply(&self, mut config: ScraperConfig) -> ScraperConfig {
        if let Some(addr) = &self.addr {
            config.addr = addr.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(webdriver_url) = &self.webdriver_url {
            config.webdriver_url = webdriver_url.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        config
    }
}

pub fn print_usage() {
    println!("Kullanım:");
    println!("  snap-page <URL>");
    println!("  snap-page --serve [--addr 127.0.0.1:8080] [--timeout 30]");
    println!("Örnek:");
    println!("  snap-page https://example.com");
    println!("  snap-page --serve");
}

/// Reminder printed before a command line scrape
pub fn webdriver_hint(webdriver_url: &str) -> String {
    format!(
        "Not: sayfa cizimi icin bir WebDriver sunucusu gerekir (ornegin ChromeDriver).\n\
         {} kullanilmiyorsa WEBDRIVER_URL veya --webdriver-url ile adresi verin",
        webdriver_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config() {
        let args = Args::parse_from(["snap-page", "https://example.com"]);
        assert_eq!(args.url.as_deref(), Some("https://example.com"));
        assert!(!args.serve);

        let config = args.apply(ScraperConfig::default());
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "snap-page",
            "--serve",
            "--addr",
            "0.0.0.0:9000",
            "--timeout",
            "5",
        ]);
        assert!(args.serve);
        assert!(args.url.is_none());

        let config = args.apply(ScraperConfig::default());
        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_webdriver_hint_is_turkish_and_names_endpoint() {
        let hint = webdriver_hint("http://localhost:9515");
        assert!(hint.starts_with("Not: sayfa cizimi icin bir WebDriver sunucusu gerekir"));
        assert!(hint.contains("http://localhost:9515 kullanilmiyorsa"));
    }
}
