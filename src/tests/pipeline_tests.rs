use super::fakes::{FakeRenderer, FixedProbe, example_page, scraper_in_tempdir};
use crate::error::{ArtifactKind, Error};
use crate::results::RenderedPage;
use crate::storage::{DATA_DIR, SCREENSHOT_DIR, URLS_DIR};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(30);

fn count_files(root: &Path, dir: &str) -> usize {
    fs::read_dir(root.join(dir)).unwrap().count()
}

#[tokio::test]
async fn test_example_com_end_to_end() {
    let renderer = Arc::new(FakeRenderer::returning(example_page()));
    let (dir, scraper) = scraper_in_tempdir(FixedProbe(Some(200)), renderer.clone());

    let result = scraper.scrape("https://example.com", TIMEOUT).await;

    assert!(result.is_success());
    assert_eq!(result.status_code, 200);
    assert!(result.write_failures.is_empty());
    assert_eq!(renderer.calls(), 1);

    let relative: Vec<_> = result
        .paths()
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            Path::new("data/example.com_data.html"),
            Path::new("screenshot/example.com_screenshot.png"),
            Path::new("urls/example.com_urls.txt"),
        ]
    );

    let html = fs::read_to_string(dir.path().join("data/example.com_data.html")).unwrap();
    assert!(html.starts_with("<html>") && html.ends_with("</html>"));
    let shot = fs::read(dir.path().join("screenshot/example.com_screenshot.png")).unwrap();
    assert_eq!(shot.len(), 10);
    let urls = fs::read_to_string(dir.path().join("urls/example.com_urls.txt")).unwrap();
    assert_eq!(urls, "https://example.com/a\nhttps://example.com/b");
}

#[tokio::test]
async fn test_render_failure_writes_nothing() {
    let renderer = Arc::new(FakeRenderer::failing());
    let (dir, scraper) = scraper_in_tempdir(FixedProbe(Some(404)), renderer);

    let result = scraper.scrape("https://example.com", TIMEOUT).await;

    assert!(!result.is_success());
    assert_eq!(result.status_code, 404);
    assert!(matches!(result.error, Some(Error::Render { .. })));
    assert!(result.paths().is_empty());
    for d in [DATA_DIR, SCREENSHOT_DIR, URLS_DIR] {
        assert_eq!(count_files(dir.path(), d), 0, "{} should be empty", d);
    }
}

#[tokio::test]
async fn test_probe_failure_does_not_stop_render() {
    let renderer = Arc::new(FakeRenderer::returning(example_page()));
    let (_dir, scraper) = scraper_in_tempdir(FixedProbe(None), renderer.clone());

    let result = scraper.scrape("https://example.com", TIMEOUT).await;

    assert!(result.is_success());
    assert_eq!(result.status_code, 0);
    assert_eq!(renderer.calls(), 1);
    assert_eq!(result.paths().len(), 3);
}

#[tokio::test]
async fn test_failed_artifact_write_keeps_scrape_successful() {
    let renderer = Arc::new(FakeRenderer::returning(example_page()));
    let (dir, scraper) = scraper_in_tempdir(FixedProbe(Some(200)), renderer);

    // Make the data directory unusable
    let data = dir.path().join(DATA_DIR);
    fs::remove_dir(&data).unwrap();
    fs::write(&data, "").unwrap();

    let result = scraper.scrape("https://example.com", TIMEOUT).await;

    assert!(result.is_success());
    assert!(result.html_path.is_none());
    assert!(result.screenshot_path.is_some());
    assert!(result.urls_path.is_some());
    assert_eq!(result.write_failures.len(), 1);
    assert!(matches!(
        result.write_failures[0],
        Error::Persist {
            artifact: ArtifactKind::Html,
            ..
        }
    ));
}

#[tokio::test]
async fn test_no_links_no_urls_file() {
    let page = RenderedPage::new("<html></html>".to_string(), vec![1, 2, 3], Vec::new());
    let renderer = Arc::new(FakeRenderer::returning(page));
    let (dir, scraper) = scraper_in_tempdir(FixedProbe(Some(200)), renderer);

    let result = scraper.scrape("https://example.com", TIMEOUT).await;

    assert!(result.is_success());
    assert!(result.urls_path.is_none());
    assert_eq!(result.paths().len(), 2);
    assert_eq!(count_files(dir.path(), URLS_DIR), 0);
}

#[tokio::test]
async fn test_identifier_comes_from_sanitized_url() {
    let renderer = Arc::new(FakeRenderer::returning(example_page()));
    let (dir, scraper) = scraper_in_tempdir(FixedProbe(Some(200)), renderer);

    let result = scraper
        .scrape("https://www.Example.com/a?b=c&d=e", TIMEOUT)
        .await;

    assert_eq!(
        result.html_path.unwrap(),
        dir.path().join("data/Example.com_a_b_c_d_e_data.html")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_identical_scrapes() {
    let first = RenderedPage::new(
        format!("<html>{}</html>", "a".repeat(64 * 1024)),
        vec![1; 4096],
        vec!["https://example.com/one".to_string()],
    );
    let second = RenderedPage::new(
        "<html>b</html>".to_string(),
        vec![2; 16],
        vec![
            "https://example.com/two".to_string(),
            "https://example.com/three".to_string(),
        ],
    );
    let renderer = Arc::new(FakeRenderer::cycling(vec![first.clone(), second.clone()]));
    let (dir, scraper) = scraper_in_tempdir(FixedProbe(Some(200)), renderer);

    let (a, b) = tokio::join!(
        scraper.scrape("https://example.com", TIMEOUT),
        scraper.scrape("https://example.com", TIMEOUT)
    );
    assert!(a.is_success() && b.is_success());
    assert!(a.write_failures.is_empty() && b.write_failures.is_empty());

    let html = fs::read_to_string(dir.path().join("data/example.com_data.html")).unwrap();
    assert!(html == first.html || html == second.html);
    let shot = fs::read(dir.path().join("screenshot/example.com_screenshot.png")).unwrap();
    assert!(shot == first.screenshot || shot == second.screenshot);
    let urls = fs::read_to_string(dir.path().join("urls/example.com_urls.txt")).unwrap();
    assert!(urls == first.links.join("\n") || urls == second.links.join("\n"));

    // Only the final files remain
    assert_eq!(count_files(dir.path(), DATA_DIR), 1);
}
