use clap::Parser;
use snap_page::{Scraper, ScraperConfig, WebServer};
use std::process::ExitCode;

mod args;
use args::{Args, print_usage, webdriver_hint};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Ayar dosyasi okunamadi {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ScraperConfig::default(),
    };
    let config = args.apply(base.apply_env());
    if let Err(e) = config.validate() {
        ::log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    if !args.serve && args.url.is_none() {
        print_usage();
        return ExitCode::FAILURE;
    }

    let scraper = match Scraper::from_config(&config) {
        Ok(scraper) => scraper,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = scraper.layout().ensure_dirs() {
        ::log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    if args.serve {
        let server = WebServer::new(config.addr.clone(), config.timeout(), scraper);
        if let Err(e) = server.run().await {
            ::log::error!("Sunucu durdu: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let Some(url) = args.url.as_deref() else {
        return ExitCode::FAILURE;
    };

    println!("{}", webdriver_hint(&config.webdriver_url));

    let result = scraper.scrape(url, config.timeout()).await;
    if let Some(e) = &result.error {
        ::log::error!("Hata: {}", e);
        return ExitCode::FAILURE;
    }

    for failure in &result.write_failures {
        ::log::warn!("{}", failure);
    }

    if result.status_code > 0 {
        println!("\nislem basariyla tamamlandi HTTP {}", result.status_code);
    } else {
        println!("\nislem basariyla tamamlandi");
    }
    ExitCode::SUCCESS
}
