//! Error types for the img2alt library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Img2AltError`] — **Fatal**: the service cannot start or a whole
//!   route-level operation failed (bad config, bind failure, ledger reset
//!   I/O). Returned as `Err(Img2AltError)` from server entry points.
//!
//! * [`UnitError`] — **Non-fatal**: one processed unit (an uploaded file or
//!   a single PDF page) failed. The orchestrator catches these at the
//!   smallest feasible scope and degrades — substituting a placeholder
//!   description, an empty translation, or a per-page error entry — so a
//!   single bad unit never aborts the rest of the batch.
//!
//! The separation lets the orchestrator decide, per call site, whether to
//! unwrap-with-default or to record an error entry in the results list.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the img2alt library.
///
/// Per-unit failures use [`UnitError`] and are degraded inside the
/// orchestrator rather than propagated here.
#[derive(Debug, Error)]
pub enum Img2AltError {
    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Server errors ─────────────────────────────────────────────────────
    /// Could not bind the listen socket.
    #[error("Failed to bind '{addr}': {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop terminated with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    // ── Store errors ──────────────────────────────────────────────────────
    /// Could not read, truncate, or reinitialise the ledger file.
    #[error("Ledger I/O failed for '{path}': {source}")]
    LedgerIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or clear the temp-asset directory.
    #[error("Asset store I/O failed for '{path}': {source}")]
    AssetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single processed unit (file or PDF page).
///
/// Mirrors the failure taxonomy of the pipeline: every variant is caught by
/// the orchestrator and converted into either a skip, a placeholder string,
/// or an inline error entry — never a hard abort of the request.
#[derive(Debug, Clone, Error)]
pub enum UnitError {
    /// The uploaded file's bytes could not be read from the request.
    #[error("Failed to read file '{name}': {detail}")]
    FileRead { name: String, detail: String },

    /// PDF or image bytes could not be decoded into a raster.
    #[error("Failed to decode '{name}': {detail}")]
    Decode { name: String, detail: String },

    /// The vision model call failed (transport error or non-2xx response).
    #[error("Remote model call failed: {detail}")]
    RemoteCall { detail: String },

    /// The translation model call failed.
    #[error("Translation failed: {detail}")]
    Translation { detail: String },

    /// No API credential is configured; no request was attempted.
    #[error("OPENROUTER_API_KEY is not set; translation skipped")]
    MissingCredential,

    /// Writing the temp asset or the ledger row failed.
    #[error("Storage failed: {detail}")]
    Storage { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display() {
        let e = Img2AltError::InvalidConfig("port must be non-zero".into());
        assert!(e.to_string().contains("port must be non-zero"));
    }

    #[test]
    fn unit_error_display_carries_context() {
        let e = UnitError::Decode {
            name: "scan.pdf".into(),
            detail: "not a PDF".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("scan.pdf"));
        assert!(msg.contains("not a PDF"));
    }

    #[test]
    fn missing_credential_names_the_variable() {
        assert!(UnitError::MissingCredential
            .to_string()
            .contains("OPENROUTER_API_KEY"));
    }
}
