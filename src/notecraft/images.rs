//! Figure images for the print page.
//!
//! Each figure's file is read in input order and embedded as a `data:` URI, so
//! the printed HTML stands alone wherever it is written. Relative paths resolve
//! against the form's directory. A file that cannot be read is reported and its
//! figure dropped; the remaining figures keep their numbers.

use crate::outline::Figure;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A figure that was left out because its file could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageError {
    pub number: usize,
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Figure {} skipped, could not read {}: {}",
            self.number,
            self.path.display(),
            self.reason
        )
    }
}

pub fn resolve_image_path(base_dir: Option<&Path>, path: &Path) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

fn media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

pub fn data_uri(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type(path), STANDARD.encode(bytes))
}

/// Reads every figure's file and fills in its `src`. Figures whose files fail
/// to read are removed and returned as errors, in input order.
pub fn embed_figures(
    figures: Vec<Figure>,
    base_dir: Option<&Path>,
) -> (Vec<Figure>, Vec<ImageError>) {
    let mut embedded = Vec::with_capacity(figures.len());
    let mut errors = Vec::new();

    for mut figure in figures {
        let path = resolve_image_path(base_dir, &figure.path);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "embedded figure");
                figure.src = Some(data_uri(&path, &bytes));
                embedded.push(figure);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable figure");
                errors.push(ImageError {
                    number: figure.number,
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    (embedded, errors)
}
