//! Askama template structs for the HTML views.
//!
//! Outcomes are flattened into view structs with plain fields and
//! discriminator strings so the templates stay free of enum matching.

use crate::outcome::{PageOutcome, ProcessingOutcome};
use askama::Template;

/// The upload form, with optional flash-style notices.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl IndexTemplate {
    pub fn plain() -> Self {
        Self {
            error: None,
            success: None,
        }
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }

    pub fn with_success(message: impl Into<String>) -> Self {
        Self {
            error: None,
            success: Some(message.into()),
        }
    }
}

/// The results page: one entry per uploaded file.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub results: Vec<ResultEntry>,
}

/// Flat view of one [`ProcessingOutcome`].
pub struct ResultEntry {
    pub filename: String,
    /// "image", "pdf", or "error".
    pub kind: &'static str,
    pub image_path: String,
    pub analysis: String,
    pub french_analysis: String,
    pub pages: Vec<PageEntry>,
    pub error: String,
}

/// Flat view of one [`PageOutcome`].
pub struct PageEntry {
    pub page_num: usize,
    pub has_image: bool,
    pub image_path: String,
    pub long_desc: String,
    pub french_long_desc: String,
    pub has_error: bool,
    pub error: String,
}

impl From<ProcessingOutcome> for ResultEntry {
    fn from(outcome: ProcessingOutcome) -> Self {
        match outcome {
            ProcessingOutcome::Image {
                filename,
                image_path,
                analysis,
                french_analysis,
            } => Self {
                filename,
                kind: "image",
                image_path,
                analysis,
                french_analysis,
                pages: Vec::new(),
                error: String::new(),
            },
            ProcessingOutcome::Pdf { filename, pages } => Self {
                filename,
                kind: "pdf",
                image_path: String::new(),
                analysis: String::new(),
                french_analysis: String::new(),
                pages: pages.into_iter().map(PageEntry::from).collect(),
                error: String::new(),
            },
            ProcessingOutcome::Error { filename, error } => Self {
                filename,
                kind: "error",
                image_path: String::new(),
                analysis: String::new(),
                french_analysis: String::new(),
                pages: Vec::new(),
                error,
            },
        }
    }
}

impl From<PageOutcome> for PageEntry {
    fn from(page: PageOutcome) -> Self {
        Self {
            page_num: page.page_num,
            has_image: page.image_path.is_some(),
            image_path: page.image_path.unwrap_or_default(),
            long_desc: page.long_desc,
            french_long_desc: page.french_long_desc,
            has_error: page.error.is_some(),
            error: page.error.unwrap_or_default(),
        }
    }
}
