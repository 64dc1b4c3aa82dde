use crate::results::ScrapeResult;
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
	body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;margin:40px;}
	form{display:flex;gap:8px;}
	input[type=url]{flex:1;padding:10px;font-size:16px;border:1px solid #ccc;border-radius:6px;}
	button{padding:10px 16px;font-size:16px;border:0;border-radius:6px;background:#0ea5e9;color:#fff;cursor:pointer}
	button:hover{background:#0284c7}
	.msg{margin-top:16px;padding:12px;border-radius:6px;border:1px solid #ccc}
	.ok{color:#16a34a;background:#dcfce7;border-color:#bbf7d0}
	.err{color:#dc2626;background:#fee2e2;border-color:#fecaca}
	.results{margin-top:24px}
	code{background:#f3f4f6;padding:2px 6px;border-radius:4px}
	.status{margin-top:8px;font-size:14px;color:#666}
	.status.good{color:#16a34a}
	.status.bad{color:#dc2626}
"#;

/// Outcome class shown on the result page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Ok,
    Err,
}

impl MessageClass {
    fn css(self) -> &'static str {
        match self {
            MessageClass::Ok => "ok",
            MessageClass::Err => "err",
        }
    }
}

/// Everything the form page can show
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub message: Option<(MessageClass, String)>,
    pub status_code: u16,
    pub files: Vec<String>,
    pub warnings: Vec<String>,
}

impl PageView {
    /// Page with an error message and nothing else
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some((MessageClass::Err, message.into())),
            ..Self::default()
        }
    }

    /// Page describing the outcome of a scrape
    pub fn from_result(result: &ScrapeResult) -> Self {
        let status = result.status_code;
        match &result.error {
            Some(err) => {
                let message = if status > 0 {
                    format!("Hata (HTTP {}): {}", status, err)
                } else {
                    format!("Hata: {}", err)
                };
                Self {
                    message: Some((MessageClass::Err, message)),
                    status_code: status,
                    ..Self::default()
                }
            }
            None => {
                let message = if status > 0 {
                    format!("islem tamamlandi HTTP {}", status)
                } else {
                    "islem tamamlandi".to_string()
                };
                Self {
                    message: Some((MessageClass::Ok, message)),
                    status_code: status,
                    files: result
                        .paths()
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect(),
                    warnings: result.write_failures.iter().map(|e| e.to_string()).collect(),
                }
            }
        }
    }
}

/// Renders the form page, with the outcome block when there is one
pub fn render_page(view: &PageView) -> String {
    let mut body = String::new();

    if let Some((class, message)) = &view.message {
        body.push_str(&format!(
            "\n  <div class=\"msg {}\">\n\t{}",
            class.css(),
            encode_text(message)
        ));
        if view.status_code > 0 {
            let status_class = if view.status_code < 400 { "good" } else { "bad" };
            body.push_str(&format!(
                "\n\t<div class=\"status {}\">HTTP {}</div>",
                status_class, view.status_code
            ));
        }
        body.push_str("\n  </div>");
    }

    if !view.files.is_empty() {
        body.push_str("\n  <div class=\"results\">\n\t<h3>Oluşan dosyalar</h3>\n\t<ul>");
        for file in &view.files {
            body.push_str(&format!(
                "<li><code title=\"{}\">{}</code></li>",
                encode_double_quoted_attribute(file),
                encode_text(file)
            ));
        }
        body.push_str("</ul>\n  </div>");
    }

    if !view.warnings.is_empty() {
        body.push_str("\n  <div class=\"msg err warnings\">\n\t<h3>Kaydedilemeyen dosyalar</h3>\n\t<ul>");
        for warning in &view.warnings {
            body.push_str(&format!("<li>{}</li>", encode_text(warning)));
        }
        body.push_str("</ul>\n  </div>");
    }

    format!(
        r#"<!doctype html>
<html lang="tr">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Web Scraper</title>
  <style>{STYLE}</style>
</head>
<body>
  <h1>Web Scraper</h1>
  <form method="POST" action="/scrape">
	<input type="url" name="url" placeholder="https://example.com" required />
	<button type="submit">Çek ve Kaydet</button>
  </form>{body}
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_empty_view_has_only_the_form() {
        let html = render_page(&PageView::default());
        assert!(html.contains("action=\"/scrape\""));
        assert!(!html.contains("class=\"msg"));
        assert!(!html.contains("Oluşan dosyalar"));
    }

    #[test]
    fn test_messages_are_escaped() {
        let html = render_page(&PageView::error("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_failed_result_view() {
        let result = ScrapeResult {
            status_code: 503,
            error: Some(Error::Timeout(Duration::from_secs(30))),
            ..ScrapeResult::default()
        };
        let view = PageView::from_result(&result);
        let (class, message) = view.message.clone().unwrap();
        assert_eq!(class, MessageClass::Err);
        assert!(message.starts_with("Hata (HTTP 503): zaman asimi"));
        assert!(view.files.is_empty());
        assert!(render_page(&view).contains("status bad"));
    }

    #[test]
    fn test_success_view_lists_written_files() {
        let result = ScrapeResult {
            status_code: 200,
            html_path: Some(PathBuf::from("data/example.com_data.html")),
            screenshot_path: Some(PathBuf::from("screenshot/example.com_screenshot.png")),
            ..ScrapeResult::default()
        };
        let view = PageView::from_result(&result);
        assert_eq!(
            view.message,
            Some((MessageClass::Ok, "islem tamamlandi HTTP 200".to_string()))
        );
        assert_eq!(
            view.files,
            vec![
                "data/example.com_data.html",
                "screenshot/example.com_screenshot.png"
            ]
        );
        assert!(render_page(&view).contains("status good"));
    }

    #[test]
    fn test_unknown_status_is_hidden() {
        let view = PageView::from_result(&ScrapeResult::default());
        assert_eq!(
            view.message,
            Some((MessageClass::Ok, "islem tamamlandi".to_string()))
        );
        assert!(!render_page(&view).contains("class=\"status"));
    }
}
