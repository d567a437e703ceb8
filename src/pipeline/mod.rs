//! Pipeline stages for describing uploaded images and PDF pages.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. a different chat backend) without touching the
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! decode ──▶ encode ──▶ vision ──▶ postprocess ──▶ translate
//! (pdfium)   (base64)   (remote)   (HTML re-wrap)  (remote)
//! ```
//!
//! 1. [`decode`]      — PDF bytes → ordered page rasters (spawn_blocking,
//!    pdfium is not async-safe); image bytes → a single raster
//! 2. [`encode`]      — PNG-encode and base64-wrap each raster for the
//!    multimodal request body
//! 3. [`openrouter`]  — chat-completions wire types, the [`openrouter::ChatApi`]
//!    trait seam, and the production HTTP client
//! 4. [`vision`]      — mode-keyed prompt and token-budget selection; the
//!    only stage with network I/O besides translation
//! 5. [`postprocess`] — deterministic HTML re-wrap for long-mode responses
//!    that ignored the formatting instructions
//! 6. [`translate`]   — English → French with markup preserved

pub mod decode;
pub mod encode;
pub mod openrouter;
pub mod postprocess;
pub mod translate;
pub mod vision;
