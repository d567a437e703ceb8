//! Per-file processing outcomes handed to the results view.
//!
//! Outcomes are request-scoped: constructed during orchestration, rendered
//! once, then discarded. Only their ledger projection
//! ([`crate::ledger::LedgerRow`]) survives the request.

use serde::Serialize;

/// The result of processing one uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    /// A plain image: one short description plus its translation.
    Image {
        filename: String,
        image_path: String,
        analysis: String,
        french_analysis: String,
    },
    /// A PDF: one entry per page, in page order.
    Pdf {
        filename: String,
        pages: Vec<PageOutcome>,
    },
    /// The file failed as a whole (unreadable, undecodable, storage error).
    Error { filename: String, error: String },
}

impl ProcessingOutcome {
    /// The uploaded file's name, whatever the outcome kind.
    pub fn filename(&self) -> &str {
        match self {
            ProcessingOutcome::Image { filename, .. } => filename,
            ProcessingOutcome::Pdf { filename, .. } => filename,
            ProcessingOutcome::Error { filename, .. } => filename,
        }
    }
}

/// The result of processing one PDF page.
///
/// A failed page still occupies its slot in the page list — with
/// placeholder descriptions and `error` set — so page numbering stays
/// aligned with the document.
#[derive(Debug, Clone, Serialize)]
pub struct PageOutcome {
    /// 1-based page number.
    pub page_num: usize,
    /// Web path of the stored page raster, if it was saved.
    pub image_path: Option<String>,
    /// Long HTML description (or the English placeholder on error).
    pub long_desc: String,
    /// French translation (or the French placeholder on error).
    pub french_long_desc: String,
    /// Present when this page failed.
    pub error: Option<String>,
}
