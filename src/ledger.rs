//! The CSV ledger: one appended row per processed image or PDF page.
//!
//! [`LedgerStore`] wraps a single file-system resource behind a
//! `tokio::sync::Mutex`, so concurrent requests cannot interleave partial
//! rows. The schema is fixed-width: every row has all five columns, with
//! the short-description pair empty for PDF pages and the long-description
//! pair empty for plain images.
//!
//! The header row is written once, when the file is first created, and is
//! only ever rewritten by an explicit [`LedgerStore::reset`]. There is no
//! transactional guarantee across rows: a crash mid-batch leaves a
//! partially-written ledger, which is acceptable.

use crate::error::{Img2AltError, UnitError};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Fixed five-column header, in ledger column order.
pub const LEDGER_HEADER: [&str; 5] = [
    "Image filename",
    "Image alt text (English)",
    "Image alt text (French)",
    "PDF description (English)",
    "PDF description (French)",
];

/// One persisted row: the fixed-width projection of a description result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub filename: String,
    pub alt_text_en: String,
    pub alt_text_fr: String,
    pub pdf_desc_en: String,
    pub pdf_desc_fr: String,
}

impl LedgerRow {
    /// Row for a plain image: short alt text populated, long fields empty.
    pub fn for_image(filename: impl Into<String>, alt_en: impl Into<String>, alt_fr: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            alt_text_en: alt_en.into(),
            alt_text_fr: alt_fr.into(),
            pdf_desc_en: String::new(),
            pdf_desc_fr: String::new(),
        }
    }

    /// Row for a PDF page: long description populated, short fields empty.
    pub fn for_pdf_page(filename: impl Into<String>, desc_en: impl Into<String>, desc_fr: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            alt_text_en: String::new(),
            alt_text_fr: String::new(),
            pdf_desc_en: desc_en.into(),
            pdf_desc_fr: desc_fr.into(),
        }
    }

    fn as_record(&self) -> [&str; 5] {
        [
            &self.filename,
            &self.alt_text_en,
            &self.alt_text_fr,
            &self.pdf_desc_en,
            &self.pdf_desc_fr,
        ]
    }
}

/// Append-only CSV ledger with an internal single-writer lock.
pub struct LedgerStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LedgerStore {
    /// Create a store for the given file path. The file itself is created
    /// lazily, on the first append or download.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The underlying file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append exactly one row, writing the header first if the file does
    /// not exist yet.
    pub async fn append(&self, row: &LedgerRow) -> Result<(), UnitError> {
        let _guard = self.lock.lock().await;

        let write_header = !self.path.exists();
        let file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| UnitError::Storage {
                detail: format!("open ledger '{}': {e}", self.path.display()),
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer
                .write_record(LEDGER_HEADER)
                .map_err(|e| UnitError::Storage {
                    detail: format!("write ledger header: {e}"),
                })?;
        }

        writer
            .write_record(row.as_record())
            .map_err(|e| UnitError::Storage {
                detail: format!("write ledger row: {e}"),
            })?;
        writer.flush().map_err(|e| UnitError::Storage {
            detail: format!("flush ledger: {e}"),
        })?;

        debug!("Ledger row appended for '{}'", row.filename);
        Ok(())
    }

    /// Truncate the ledger and rewrite just the header row.
    pub async fn reset(&self) -> Result<(), Img2AltError> {
        let _guard = self.lock.lock().await;
        self.write_header_only()
    }

    /// Create a header-only file if none exists (used by the download
    /// route so it always has something to serve).
    pub async fn ensure_exists(&self) -> Result<(), Img2AltError> {
        let _guard = self.lock.lock().await;
        if self.path.exists() {
            return Ok(());
        }
        self.write_header_only()
    }

    fn write_header_only(&self) -> Result<(), Img2AltError> {
        let io_err = |e| Img2AltError::LedgerIo {
            path: self.path.clone(),
            source: e,
        };

        let file = std::fs::File::create(&self.path).map_err(io_err)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(LEDGER_HEADER)
            .map_err(|e| Img2AltError::Internal(format!("write ledger header: {e}")))?;
        writer.flush().map_err(io_err)?;

        debug!("Ledger reinitialised at '{}'", self.path.display());
        Ok(())
    }
}
