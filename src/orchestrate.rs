//! The upload orchestrator: drives the pipeline per file and per page.
//!
//! ## Failure policy
//!
//! The one deliberate "systems" property of this pipeline is
//! all-continue, never-abort:
//!
//! * a file whose bytes cannot be decoded becomes an `Error` outcome;
//! * a vision failure becomes a placeholder description string;
//! * a translation failure (or missing credential) becomes `""`;
//! * a failed PDF page becomes an error page entry, and the remaining
//!   pages still run;
//! * nothing short of a process crash aborts the batch.
//!
//! Every degrade happens at the smallest feasible scope, is logged, and is
//! decided here — the pipeline clients return typed [`UnitError`]s and the
//! orchestrator chooses, per call site, what default to substitute.
//!
//! ## Ordering
//!
//! Files and pages are processed strictly sequentially, so output order is
//! input order by construction; PDF page outcomes keep document order.

use crate::assets::AssetStore;
use crate::config::AppConfig;
use crate::error::UnitError;
use crate::ledger::{LedgerRow, LedgerStore};
use crate::outcome::{PageOutcome, ProcessingOutcome};
use crate::pipeline::openrouter::ChatApi;
use crate::pipeline::vision::DescriptionMode;
use crate::pipeline::{decode, translate, vision};
use image::DynamicImage;
use std::sync::Arc;
use tracing::{info, warn};

/// English placeholder for a page that failed mid-processing.
const PAGE_ERROR_EN: &str = "Error during processing";
/// French placeholder for a page that failed mid-processing.
const PAGE_ERROR_FR: &str = "Erreur pendant le traitement";

/// One uploaded file, read fully into memory for the request's lifetime.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Drives the describe → translate → store → ledger sequence for a batch.
pub struct Orchestrator {
    api: Arc<dyn ChatApi>,
    ledger: Arc<LedgerStore>,
    assets: Arc<AssetStore>,
    config: AppConfig,
}

impl Orchestrator {
    pub fn new(
        api: Arc<dyn ChatApi>,
        ledger: Arc<LedgerStore>,
        assets: Arc<AssetStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            api,
            ledger,
            assets,
            config,
        }
    }

    /// Process a batch of uploads, producing one outcome per file in input
    /// order. An empty batch produces an empty list; the caller renders
    /// the "no files" notice.
    pub async fn process_batch(
        &self,
        files: Vec<UploadedFile>,
        vision_model: &str,
    ) -> Vec<ProcessingOutcome> {
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            let filename = file.filename.clone();
            let outcome = if file.content_type == "application/pdf" {
                self.process_pdf(file, vision_model).await
            } else {
                self.process_image(file, vision_model).await
            };

            results.push(outcome.unwrap_or_else(|e| {
                warn!("Error processing file '{}': {}", filename, e);
                ProcessingOutcome::Error {
                    filename,
                    error: format!("Error processing file: {e}"),
                }
            }));
        }

        results
    }

    /// Describe-or-placeholder: a failed vision call degrades to a
    /// human-readable error string standing in for the description.
    async fn describe_or_placeholder(
        &self,
        image: &DynamicImage,
        mode: DescriptionMode,
        model: &str,
    ) -> String {
        match vision::describe(&self.api, image, mode, model, &self.config).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Vision call failed: {}", e);
                format!("Error getting analysis: {e}")
            }
        }
    }

    /// Translate-or-empty: missing credential and remote failures both
    /// degrade to an empty French column.
    async fn translate_or_empty(&self, text: &str) -> String {
        match translate::translate_to_french(&self.api, text, &self.config).await {
            Ok(fr) => fr,
            Err(UnitError::MissingCredential) => {
                warn!("{}", UnitError::MissingCredential);
                String::new()
            }
            Err(e) => {
                warn!("Translation error: {}", e);
                String::new()
            }
        }
    }

    async fn process_image(
        &self,
        file: UploadedFile,
        vision_model: &str,
    ) -> Result<ProcessingOutcome, UnitError> {
        let image = decode::image_from_bytes(&file.filename, &file.bytes)?;

        let analysis = self
            .describe_or_placeholder(&image, DescriptionMode::AltText, vision_model)
            .await;
        let french_analysis = self.translate_or_empty(&analysis).await;

        let image_path = self.assets.save(&image, &file.filename).await?;

        self.ledger
            .append(&LedgerRow::for_image(
                &file.filename,
                &analysis,
                &french_analysis,
            ))
            .await?;

        info!("Processed image '{}'", file.filename);
        Ok(ProcessingOutcome::Image {
            filename: file.filename,
            image_path,
            analysis,
            french_analysis,
        })
    }

    async fn process_pdf(
        &self,
        file: UploadedFile,
        vision_model: &str,
    ) -> Result<ProcessingOutcome, UnitError> {
        // A PDF that fails to decode yields zero pages: logged, surfaced
        // to the user only as an empty page list, and the batch moves on.
        let pages = match decode::pdf_to_page_images(
            &file.filename,
            file.bytes,
            self.config.max_rendered_pixels,
        )
        .await
        {
            Ok(pages) => pages,
            Err(e) => {
                warn!("Error converting PDF '{}': {}", file.filename, e);
                Vec::new()
            }
        };

        Ok(self
            .process_pdf_pages(&file.filename, &pages, vision_model)
            .await)
    }

    /// Describe a sequence of already-rendered page rasters, in order.
    ///
    /// A failed page keeps its slot with placeholder descriptions and an
    /// error entry; the remaining pages still run. Callers that render
    /// pages themselves can feed them here directly.
    pub async fn process_pdf_pages(
        &self,
        filename: &str,
        pages: &[DynamicImage],
        vision_model: &str,
    ) -> ProcessingOutcome {
        let mut page_outcomes = Vec::with_capacity(pages.len());

        for (idx, image) in pages.iter().enumerate() {
            let page_num = idx + 1;
            match self
                .process_pdf_page(filename, page_num, image, vision_model)
                .await
            {
                Ok(outcome) => page_outcomes.push(outcome),
                Err(e) => {
                    warn!(
                        "Error processing page {} of PDF '{}': {}",
                        page_num, filename, e
                    );
                    page_outcomes.push(PageOutcome {
                        page_num,
                        image_path: None,
                        long_desc: PAGE_ERROR_EN.to_string(),
                        french_long_desc: PAGE_ERROR_FR.to_string(),
                        error: Some(format!("Error processing page: {e}")),
                    });
                }
            }
        }

        info!(
            "Processed PDF '{}' ({} pages)",
            filename,
            page_outcomes.len()
        );
        ProcessingOutcome::Pdf {
            filename: filename.to_string(),
            pages: page_outcomes,
        }
    }

    async fn process_pdf_page(
        &self,
        filename: &str,
        page_num: usize,
        image: &DynamicImage,
        vision_model: &str,
    ) -> Result<PageOutcome, UnitError> {
        let long_desc = self
            .describe_or_placeholder(image, DescriptionMode::PdfPage, vision_model)
            .await;
        let french_long_desc = self.translate_or_empty(&long_desc).await;

        let asset_name = format!("{}_page_{}.png", filename.replace('.', "_"), page_num);
        let image_path = self.assets.save(image, &asset_name).await?;

        self.ledger
            .append(&LedgerRow::for_pdf_page(
                format!("{filename}_page_{page_num}"),
                &long_desc,
                &french_long_desc,
            ))
            .await?;

        Ok(PageOutcome {
            page_num,
            image_path: Some(image_path),
            long_desc,
            french_long_desc,
            error: None,
        })
    }
}
