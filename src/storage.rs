//! Artifact storage
//!
//! Every scrape leaves up to three files behind, named after the site
//! identifier:
//! - `data/{id}_data.html` - rendered HTML
//! - `screenshot/{id}_screenshot.png` - full-page screenshot
//! - `urls/{id}_urls.txt` - newline separated links, only when there are links
//!
//! Writes are independent of each other. A file is written to a temporary
//! sibling and renamed into place, so a reader (or a concurrent scrape of the
//! same site) only ever sees a complete file.

use crate::error::{ArtifactKind, Error, Result};
use crate::results::{RenderedPage, WrittenArtifacts};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DATA_DIR: &str = "data";
pub const SCREENSHOT_DIR: &str = "screenshot";
pub const URLS_DIR: &str = "urls";

/// Where artifacts live on disk
#[derive(Debug, Clone, Default)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    /// Layout rooted at `root`; `.` keeps paths relative to the working directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        // Report "data/x.html" rather than "./data/x.html"
        let root = if root == Path::new(".") {
            PathBuf::new()
        } else {
            root
        };
        Self { root }
    }

    pub fn dir(&self, kind: ArtifactKind) -> PathBuf {
        let name = match kind {
            ArtifactKind::Html => DATA_DIR,
            ArtifactKind::Screenshot => SCREENSHOT_DIR,
            ArtifactKind::Urls => URLS_DIR,
        };
        self.root.join(name)
    }

    pub fn path(&self, kind: ArtifactKind, site_name: &str) -> PathBuf {
        let file_name = match kind {
            ArtifactKind::Html => format!("{}_data.html", site_name),
            ArtifactKind::Screenshot => format!("{}_screenshot.png", site_name),
            ArtifactKind::Urls => format!("{}_urls.txt", site_name),
        };
        self.dir(kind).join(file_name)
    }

    /// Creates the three artifact directories
    pub fn ensure_dirs(&self) -> Result<()> {
        for kind in [ArtifactKind::Html, ArtifactKind::Screenshot, ArtifactKind::Urls] {
            let dir = self.dir(kind);
            fs::create_dir_all(&dir).map_err(|source| Error::Bootstrap { path: dir, source })?;
        }
        Ok(())
    }
}

/// Persists rendered pages under an [`ArtifactLayout`]
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter {
    layout: ArtifactLayout,
}

impl ArtifactWriter {
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Writes html, screenshot and links in that order
    ///
    /// A failed write is recorded in `failures` and does not stop the
    /// following ones. The links file is skipped when there are no links.
    pub fn persist(&self, site_name: &str, page: &RenderedPage) -> WrittenArtifacts {
        let mut written = WrittenArtifacts::default();

        written.html_path = self.write_artifact(
            ArtifactKind::Html,
            site_name,
            page.html.as_bytes(),
            &mut written.failures,
        );
        if let Some(path) = &written.html_path {
            ::log::info!("html icerigi kaydedildi {}", path.display());
        }

        written.screenshot_path = self.write_artifact(
            ArtifactKind::Screenshot,
            site_name,
            &page.screenshot,
            &mut written.failures,
        );
        if let Some(path) = &written.screenshot_path {
            ::log::info!("ekran goruntusu kaydedildi {}", path.display());
        }

        if !page.links.is_empty() {
            let contents = page.links.join("\n");
            written.urls_path = self.write_artifact(
                ArtifactKind::Urls,
                site_name,
                contents.as_bytes(),
                &mut written.failures,
            );
            if let Some(path) = &written.urls_path {
                ::log::info!("{} adet url kaydedildi {}", page.links.len(), path.display());
            }
        }

        written
    }

    fn write_artifact(
        &self,
        kind: ArtifactKind,
        site_name: &str,
        contents: &[u8],
        failures: &mut Vec<Error>,
    ) -> Option<PathBuf> {
        let path = self.layout.path(kind, site_name);
        match write_replacing(&path, contents) {
            Ok(()) => Some(path),
            Err(source) => {
                let err = Error::Persist {
                    artifact: kind,
                    path,
                    source,
                };
                ::log::error!("{}", err);
                failures.push(err);
                None
            }
        }
    }
}

/// Replaces `path` with `contents` via a temporary file in the same directory
fn write_replacing(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
