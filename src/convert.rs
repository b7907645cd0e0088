//! Orchestration: run the pipeline for one file or a whole directory tree.
//!
//! ## Single file
//!
//! ```text
//! extract ──"" ──▶ Failed(ExtractionFailed)
//!    │
//!    ├─ ai mode, no credential ──▶ Failed(MissingCredential)
//!    ├─ ai mode ──▶ format (falls back to the extracted text)
//!    ▼
//! write ──err──▶ Failed(WriteFailed)
//!    │
//!    ▼
//! Converted { output }
//! ```
//!
//! ## Directory
//!
//! Every discovered PDF goes through the single-file pipeline with its output
//! derived next to it. Failures are counted, never fatal; the run as a whole
//! succeeds whatever the per-file results.

use crate::config::{ConversionConfig, ConversionMode};
use crate::error::{FileError, Pdf2MdError};
use crate::pipeline::extract::{extract_text, PageTextSource, PdfiumSource};
use crate::pipeline::input::{discover_pdfs, InputKind};
use crate::pipeline::llm::{format_markdown, TextGenerator};
use crate::pipeline::output::{derive_output_path, write_markdown};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Markdown written to `output`.
    Converted { output: PathBuf },
    /// Conversion abandoned; nothing was written.
    Failed(FileError),
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }
}

/// One line of a [`ConversionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<FileError>,
}

impl FileReport {
    fn new(input: &Path, outcome: FileOutcome) -> Self {
        match outcome {
            FileOutcome::Converted { output } => Self {
                input: input.to_path_buf(),
                output: Some(output),
                error: None,
            },
            FileOutcome::Failed(e) => Self {
                input: input.to_path_buf(),
                output: None,
                error: Some(e),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Whether the run covered one file or a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunScope {
    SingleFile,
    Directory,
}

/// Everything a run did, in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub mode: ConversionMode,
    pub scope: RunScope,
    pub files: Vec<FileReport>,
}

impl ConversionReport {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    /// Exit-status view of the run: a directory run always succeeds, a
    /// single-file run succeeds only if its file converted.
    pub fn is_success(&self) -> bool {
        match self.scope {
            RunScope::Directory => true,
            RunScope::SingleFile => self.files.iter().all(FileReport::is_success),
        }
    }
}

/// Runs conversions with a fixed configuration and backends.
pub struct Converter {
    config: ConversionConfig,
    source: Box<dyn PageTextSource>,
    generator: Option<Box<dyn TextGenerator>>,
}

impl Converter {
    /// Production converter: pdfium for parsing, Gemini for AI mode.
    ///
    /// A Gemini client that cannot be created is logged and treated as
    /// unavailable: AI-mode files are then written unformatted.
    ///
    /// # Errors
    /// [`Pdf2MdError::PdfiumBindingFailed`] when no pdfium library loads.
    pub fn new(config: ConversionConfig) -> Result<Self, Pdf2MdError> {
        let source = PdfiumSource::bind()?;
        let generator = default_generator(&config);
        Ok(Self::with_backends(config, Box::new(source), generator))
    }

    /// Converter over caller-supplied backends.
    ///
    /// `generator` is only consulted in AI mode; `None` there means the
    /// remote client is unavailable and files are written unformatted.
    pub fn with_backends(
        config: ConversionConfig,
        source: Box<dyn PageTextSource>,
        generator: Option<Box<dyn TextGenerator>>,
    ) -> Self {
        Self {
            config,
            source,
            generator,
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert whatever `input` designates.
    ///
    /// For a directory, `output` is ignored (with a warning) and every file's
    /// output is derived from its own name.
    pub async fn run(&self, input: &InputKind, output: Option<&Path>) -> ConversionReport {
        match input {
            InputKind::File(path) => {
                let outcome = self.convert_file(path, output).await;
                ConversionReport {
                    mode: self.config.mode,
                    scope: RunScope::SingleFile,
                    files: vec![FileReport::new(path, outcome)],
                }
            }
            InputKind::Directory(dir) => {
                if let Some(ignored) = output {
                    warn!(
                        "--output {} ignored for directory processing",
                        ignored.display()
                    );
                }
                self.convert_directory(dir).await
            }
        }
    }

    /// Convert one PDF, writing to `output` or to the derived `<stem>.md`.
    pub async fn convert_file(&self, input: &Path, output: Option<&Path>) -> FileOutcome {
        self.process_file(input, output, 1, 1).await
    }

    /// Convert every PDF under `dir`, continuing past individual failures.
    ///
    /// A tree that cannot be listed converts nothing; the report is still a
    /// successful directory run.
    pub async fn convert_directory(&self, dir: &Path) -> ConversionReport {
        let files = discover_pdfs(dir);
        let total = files.len();
        info!("Found {} PDF files in {}", total, dir.display());

        if let Some(ref cb) = self.config.progress_callback {
            cb.on_batch_start(total);
        }

        let mut reports = Vec::with_capacity(total);
        let mut succeeded = 0;
        for (i, file) in files.iter().enumerate() {
            let outcome = self.process_file(file, None, i + 1, total).await;
            if outcome.is_success() {
                succeeded += 1;
            }
            reports.push(FileReport::new(file, outcome));
        }

        info!("Converted {}/{} files", succeeded, total);
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_batch_complete(total, succeeded);
        }

        ConversionReport {
            mode: self.config.mode,
            scope: RunScope::Directory,
            files: reports,
        }
    }

    async fn process_file(
        &self,
        input: &Path,
        output: Option<&Path>,
        index: usize,
        total: usize,
    ) -> FileOutcome {
        info!("Processing: {}", input.display());
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_file_start(input, index, total);
        }

        let outcome = self.run_pipeline(input, output).await;

        if let Some(ref cb) = self.config.progress_callback {
            match &outcome {
                FileOutcome::Converted { output } => cb.on_file_complete(input, output),
                FileOutcome::Failed(e) => cb.on_file_error(input, e),
            }
        }
        outcome
    }

    async fn run_pipeline(&self, input: &Path, output: Option<&Path>) -> FileOutcome {
        // ── Step 1: Extract ──────────────────────────────────────────────────
        let text = extract_text(self.source.as_ref(), input);
        if text.is_empty() {
            debug!("Extraction failed for {}, skipping", input.display());
            return FileOutcome::Failed(FileError::ExtractionFailed {
                path: input.to_path_buf(),
            });
        }

        // ── Step 2: Format (ai mode) ─────────────────────────────────────────
        let markdown = match self.config.mode {
            ConversionMode::Standalone => text,
            ConversionMode::Ai => {
                if self.config.credential.is_none() {
                    error!("AI mode requires an API key; skipping {}", input.display());
                    return FileOutcome::Failed(FileError::MissingCredential);
                }
                if let Some(ref cb) = self.config.progress_callback {
                    cb.on_formatting(input);
                }
                format_markdown(self.generator.as_deref(), &text).await
            }
        };

        // ── Step 3: Write ────────────────────────────────────────────────────
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| derive_output_path(input));
        match write_markdown(&markdown, &output) {
            Ok(()) => {
                info!("Saved: {}", output.display());
                FileOutcome::Converted { output }
            }
            Err(e) => FileOutcome::Failed(e),
        }
    }
}

#[cfg(feature = "ai")]
fn default_generator(config: &ConversionConfig) -> Option<Box<dyn TextGenerator>> {
    use crate::pipeline::llm::LlmGenerator;

    match (config.mode, &config.credential) {
        (ConversionMode::Ai, Some(credential)) => generator_or_passthrough(
            LlmGenerator::gemini(credential, &config.model)
                .map(|g| Box::new(g) as Box<dyn TextGenerator>),
        ),
        _ => None,
    }
}

#[cfg(not(feature = "ai"))]
fn default_generator(config: &ConversionConfig) -> Option<Box<dyn TextGenerator>> {
    if config.mode == ConversionMode::Ai {
        warn!("{}", crate::error::FormatError::Unavailable);
    }
    None
}

/// A client that fails to build degrades to passthrough for the whole run.
#[cfg_attr(not(feature = "ai"), allow(dead_code))]
fn generator_or_passthrough(
    built: Result<Box<dyn TextGenerator>, Pdf2MdError>,
) -> Option<Box<dyn TextGenerator>> {
    match built {
        Ok(generator) => Some(generator),
        Err(e) => {
            error!("{e}; files will be written unformatted");
            None
        }
    }
}
