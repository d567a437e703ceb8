//! # img2alt
//!
//! Generate alt text and page descriptions for uploaded images and PDFs,
//! with French translations, served through a small web UI.
//!
//! ## Why this crate?
//!
//! Writing alt text by hand for a large batch of images — or structured
//! descriptions for every page of a scanned PDF — is slow and inconsistent.
//! This crate rasterises each upload and lets a vision-language model
//! describe it: short website-ready alt text for plain images, HTML-tagged
//! prose for PDF pages, each translated to French by a second model and
//! appended to a CSV ledger for downstream use.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Upload (images / PDFs)
//!  │
//!  ├─ 1. Decode     image bytes → raster; PDF bytes → page rasters (pdfium)
//!  ├─ 2. Encode     PNG → base64 data URL
//!  ├─ 3. Describe   vision model (alt text ≤20 words, or HTML page prose)
//!  ├─ 4. Translate  EN → FR, markup preserved
//!  ├─ 5. Store      display copy → static/temp, row → image_descriptions.csv
//!  └─ 6. Render     results page, one entry per file
//! ```
//!
//! Failures degrade, never abort: a bad page yields an inline error entry,
//! a failed vision call yields a placeholder string, a missing credential
//! yields empty translations. The batch always completes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use img2alt::{server, AppConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from OPENROUTER_API_KEY
//!     let config = AppConfig::from_env()?;
//!     server::serve(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `img2alt` binary (clap + anyhow + dotenvy + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! img2alt = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod assets;
pub mod config;
pub mod error;
pub mod ledger;
pub mod orchestrate;
pub mod outcome;
pub mod pipeline;
pub mod prompts;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use assets::{sanitize_filename, AssetStore};
pub use config::{AppConfig, AppConfigBuilder, DEFAULT_VISION_MODEL, TRANSLATION_MODEL};
pub use error::{Img2AltError, UnitError};
pub use ledger::{LedgerRow, LedgerStore, LEDGER_HEADER};
pub use orchestrate::{Orchestrator, UploadedFile};
pub use outcome::{PageOutcome, ProcessingOutcome};
pub use pipeline::openrouter::{ChatApi, OpenRouterClient};
pub use pipeline::vision::DescriptionMode;
