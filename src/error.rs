//! Error types for the pdf2md library.
//!
//! Failures split along the same line the command line draws between
//! "stop now" and "skip this file":
//!
//! * [`Pdf2MdError`]: **Fatal**: the run cannot start at all (input missing,
//!   AI mode without a credential, pdfium engine unavailable). The binary
//!   exits with status 1 before touching any file.
//!
//! * [`FileError`]: **Per file**: one PDF could not be converted. Stored in
//!   [`crate::convert::FileReport`] so a directory run carries on with the
//!   next file and reports `successes/total` at the end.
//!
//! Stage-level errors ([`ExtractError`], [`FormatError`]) are caught where
//! they originate. Extraction errors become [`FileError::ExtractionFailed`];
//! formatting errors only degrade the output to the unformatted text.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2md library.
#[derive(Debug, Error)]
pub enum Pdf2MdError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input path does not exist.
    #[error("{path:?} not found\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// The input exists but is neither a regular file nor a directory.
    #[error("{path:?} is neither a file nor a directory")]
    UnsupportedInput { path: PathBuf },

    // ── Credential / provider errors ──────────────────────────────────────
    /// AI mode was requested but no API key could be resolved.
    #[error(
        "AI mode requires an API key\n\
Set GEMINI_API_KEY or pass --api-key <KEY>."
    )]
    MissingCredential,

    /// The Gemini provider could not be constructed. Logged, not fatal: the
    /// run continues with unformatted output.
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
pdf2md reads PDFs through the pdfium engine. You can:\n\
  • Install libpdfium system-wide (e.g. from bblanchon/pdfium-binaries).\n\
  • Place libpdfium next to the pdf2md executable.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (file or directory).\n"
    )]
    PdfiumBindingFailed(String),
}

/// A non-fatal error for a single input file.
///
/// The three variants are the three ways a file's pipeline can end early,
/// and each prints a distinct diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileError {
    /// Text extraction produced nothing (open/read failure or a PDF with no text).
    #[error("Extraction failed for {path:?}, skipping")]
    ExtractionFailed { path: PathBuf },

    /// AI mode was requested for this file without a credential.
    #[error("AI mode requires an API key (set GEMINI_API_KEY or use --api-key)")]
    MissingCredential,

    /// The Markdown file could not be written.
    #[error("Cannot write {path:?}: {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}

/// Failure inside the document-parsing backend.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document could not be opened (missing, corrupt, encrypted, not a PDF).
    #[error("cannot open {path:?}: {detail}")]
    Open { path: PathBuf, detail: String },

    /// A page could not be read after the document opened.
    #[error("cannot read page {page} of {path:?}: {detail}")]
    Page {
        path: PathBuf,
        page: usize,
        detail: String,
    },
}

/// Failure while asking the remote model to reformat text.
///
/// Never fatal: the formatter logs it and falls back to the input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// This build has no remote-API client (the `ai` feature is off).
    #[error(
        "AI support is not available in this build; rebuild with `--features ai` \
or use --mode standalone"
    )]
    Unavailable,

    /// The provider call failed (auth, network, quota, malformed reply).
    #[error("Gemini formatting failed: {0}")]
    Provider(String),

    /// The model answered with no text.
    #[error("Gemini returned an empty response")]
    EmptyResponse,
}
