//! The temp-asset store: display copies of processed images.
//!
//! Every processed image (or PDF page raster) is written to a
//! public-servable directory so the results page can show what was
//! described. Names are sanitised to a safe character set; two uploads
//! sanitising to the same name silently overwrite — last writer wins.

use crate::error::{Img2AltError, UnitError};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// URL prefix under which the asset directory is served.
pub const ASSET_MOUNT: &str = "/static/temp";

/// Replace every character that is not alphanumeric, `.`, `_`, or `-`
/// with `_`.
///
/// Alphanumeric is Unicode-aware, so accented names like `résumé.pdf`
/// pass through unchanged; separators, quotes, and control characters
/// do not.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File-system store for display copies of processed images.
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, Img2AltError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| Img2AltError::AssetIo {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// The directory assets are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a PNG copy of `image` under the sanitised `name` and return
    /// the web path the results page should reference.
    ///
    /// PNG encoding is CPU-bound, so the write runs on the blocking pool.
    pub async fn save(&self, image: &DynamicImage, name: &str) -> Result<String, UnitError> {
        let safe = sanitize_filename(name);
        let path = self.dir.join(&safe);
        let img = image.clone();

        let write_path = path.clone();
        tokio::task::spawn_blocking(move || {
            img.save_with_format(&write_path, image::ImageFormat::Png)
        })
        .await
        .map_err(|e| UnitError::Storage {
            detail: format!("asset write task panicked: {e}"),
        })?
        .map_err(|e| UnitError::Storage {
            detail: format!("write asset '{}': {e}", path.display()),
        })?;

        debug!("Saved asset '{}'", path.display());
        Ok(format!("{ASSET_MOUNT}/{safe}"))
    }

    /// Delete every file in the asset directory. Subdirectories (there
    /// should be none) are left alone.
    pub fn reset(&self) -> Result<(), Img2AltError> {
        let io_err = |e| Img2AltError::AssetIo {
            path: self.dir.clone(),
            source: e,
        };

        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if path.is_file() {
                std::fs::remove_file(&path).map_err(io_err)?;
            }
        }

        debug!("Asset directory '{}' cleared", self.dir.display());
        Ok(())
    }
}
