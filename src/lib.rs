//! # pdf2md
//!
//! Convert PDF documents to Markdown, either by direct text extraction or by
//! letting Gemini restructure the extracted text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    single file, or every *.pdf under a directory (sorted)
//!  ├─ 2. Extract  per-page text via pdfium, "## Page <n>" markers
//!  ├─ 3. Format   ai mode only: Gemini rewrite, original text on failure
//!  └─ 4. Output   <stem>.md next to the input (or --output), written atomically
//! ```
//!
//! Standalone mode needs nothing but a pdfium library. AI mode also needs a
//! Gemini API key (see [`credentials`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2md::{resolve_input, ConversionConfig, Converter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = resolve_input("papers/")?;
//!     let converter = Converter::new(ConversionConfig::default())?;
//!     let report = converter.run(&input, None).await;
//!     eprintln!("converted {}/{}", report.succeeded(), report.total());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2md` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `ai`    | on      | Gemini client via `edgequake-llm`; without it AI mode writes unformatted text |
//!
//! ```toml
//! pdf2md = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ConversionMode, DEFAULT_MODEL};
pub use convert::{ConversionReport, Converter, FileOutcome, FileReport, RunScope};
pub use credentials::{
    default_sources, mask_key, resolve_credential, Credential, CredentialOrigin, CredentialSource,
};
pub use error::{ExtractError, FileError, FormatError, Pdf2MdError};
pub use pipeline::extract::{extract_text, PageText, PageTextSource, PdfiumSource};
pub use pipeline::input::{discover_pdfs, resolve_input, InputKind};
pub use pipeline::llm::{ai_available, TextGenerator};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};

#[cfg(feature = "ai")]
pub use pipeline::llm::LlmGenerator;
