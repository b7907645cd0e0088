//! CLI binary for pdf2md.
//!
//! A thin shim over the library crate: checks the input and credential up
//! front, maps CLI flags to `ConversionConfig`, and turns the run report into
//! an exit status.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2md::{
    default_sources, resolve_credential, resolve_input, ConversionConfig, ConversionMode,
    ConversionProgressCallback, ConversionReport, Converter, FileError, InputKind, Pdf2MdError,
    ProgressCallback, DEFAULT_MODEL,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a spinner naming the current file plus one persistent
/// status line per event. With `--no-progress` the bar is hidden but the
/// status lines are still printed; `--quiet` drops them as well.
struct CliProgress {
    bar: ProgressBar,
    quiet: bool,
}

impl CliProgress {
    fn new(bar: ProgressBar, quiet: bool) -> Arc<Self> {
        Arc::new(Self { bar, quiet })
    }

    fn status(&self, line: String) {
        if !self.quiet {
            self.bar.suspend(|| eprintln!("{line}"));
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ConversionProgressCallback for CliProgress {
    fn on_batch_start(&self, total_files: usize) {
        if total_files > 0 {
            self.status(format!(
                "{} {}",
                cyan("◆"),
                bold(&format!("Found {total_files} PDF files"))
            ));
        }
    }

    fn on_file_start(&self, input: &Path, index: usize, total: usize) {
        self.status(format!("\nProcessing: {}", input.display()));
        self.bar.set_prefix(format!("{index}/{total}"));
        self.bar.set_message("extracting text…");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_formatting(&self, _input: &Path) {
        self.status(dim("Formatting with Gemini…"));
        self.bar.set_message("waiting for Gemini…");
    }

    fn on_file_complete(&self, _input: &Path, output: &Path) {
        self.status(format!("{} Saved: {}", green("✓"), output.display()));
    }

    fn on_file_error(&self, _input: &Path, error: &FileError) {
        self.status(format!("{} {}", red("✗"), red(&error.to_string())));
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        self.bar.finish_and_clear();
        if total_files == 0 {
            self.status("No PDF files found.".to_string());
        } else {
            self.status(format!(
                "\n{} Done! Successfully converted {}/{} files",
                if success_count == total_files {
                    green("✔")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files
            ));
        }
    }
}

fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
    bar.set_style(style);
    bar
}

/// Routes log lines around the spinner so the two never share a line.
#[derive(Clone)]
struct BarWriter(ProgressBar);

impl Write for BarWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for BarWriter {
    type Writer = BarWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract text from one PDF (writes document.md next to it)
  pdf2md document.pdf

  # Choose the output file
  pdf2md document.pdf -o notes/document.md

  # Let Gemini restructure the text
  pdf2md --mode ai document.pdf

  # Every PDF under a directory, recursively
  pdf2md ./papers --mode ai --model gemini-2.5-pro

  # Machine-readable run report on stdout
  pdf2md ./papers --json > report.json

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY     Gemini API key (used when --api-key is not given)
  PDF2MD_MODEL       Override the Gemini model ID
  PDFIUM_LIB_PATH    Path to libpdfium (file or directory)
  RUST_LOG           Log filter, e.g. RUST_LOG=pdf2md=debug

SETUP:
  pdf2md reads PDFs through pdfium. Install libpdfium system-wide, place it
  next to the pdf2md executable, or point PDFIUM_LIB_PATH at it.
"#;

/// Convert PDF files to Markdown, optionally formatted by Gemini.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2md",
    version,
    about = "Convert PDF files to Markdown with optional Gemini formatting",
    long_about = "Convert a PDF file, or every PDF under a directory, to Markdown. Standalone \
mode writes the extracted text with a heading per page; AI mode asks Google Gemini to \
restructure it into clean Markdown.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file or directory to convert.
    input: PathBuf,

    /// Conversion mode.
    #[arg(short, long, value_enum, default_value = "standalone")]
    mode: ModeArg,

    /// Output Markdown file (single-file input only; ignored for directories).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gemini API key (AI mode). Falls back to GEMINI_API_KEY.
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Gemini model ID.
    #[arg(long, env = "PDF2MD_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Print a JSON run report on stdout.
    #[arg(long, env = "PDF2MD_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "PDF2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2MD_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Standalone,
    Ai,
}

impl From<ModeArg> for ConversionMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Standalone => ConversionMode::Standalone,
            ModeArg::Ai => ConversionMode::Ai,
        }
    }
}

/// `--json` payload: the library report plus its totals.
#[derive(Serialize)]
struct RunReport<'a> {
    total: usize,
    succeeded: usize,
    #[serde(flatten)]
    report: &'a ConversionReport,
}

impl<'a> From<&'a ConversionReport> for RunReport<'a> {
    fn from(report: &'a ConversionReport) -> Self {
        Self {
            total: report.total(),
            succeeded: report.succeeded(),
            report,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let bar = if show_progress {
        spinner()
    } else {
        ProgressBar::hidden()
    };

    // ── Logging setup ────────────────────────────────────────────────────
    // Per-file diagnostics are warnings, so they stay visible by default.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(BarWriter(bar.clone()))
        .init();

    match run(cli, bar) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", red("Error:"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, bar: ProgressBar) -> Result<ExitCode> {
    // ── Preflight: everything fatal happens before the first file ────────
    let input = resolve_input(&cli.input)?;
    let mode = ConversionMode::from(cli.mode);

    let credential = match mode {
        ConversionMode::Standalone => None,
        ConversionMode::Ai => Some(
            resolve_credential(&default_sources(cli.api_key.clone()))
                .ok_or(Pdf2MdError::MissingCredential)?,
        ),
    };

    if !cli.quiet {
        print_banner(&input, mode);
    }

    let progress = CliProgress::new(bar, cli.quiet);
    let config = ConversionConfig::builder()
        .mode(mode)
        .model(cli.model.clone())
        .credential(credential)
        .progress_callback(progress.clone() as ProgressCallback)
        .build()
        .context("Invalid configuration")?;

    // Single-threaded: files are converted strictly one after another.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let report: Result<ConversionReport, Pdf2MdError> = runtime.block_on(async {
        let converter = Converter::new(config)?;
        Ok(converter.run(&input, cli.output.as_deref()).await)
    });
    progress.finish();
    let report = report?;

    if cli.json {
        let json = serde_json::to_string_pretty(&RunReport::from(&report))
            .context("Failed to serialise the run report")?;
        println!("{json}");
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_banner(input: &InputKind, mode: ConversionMode) {
    eprintln!("{}", bold("PDF to Markdown Converter"));
    eprintln!("{}", dim("=".repeat(40).as_str()));
    eprintln!("Mode: {mode}");
    eprintln!("Input: {}", input.path().display());
    if input.is_directory() {
        eprintln!("\nProcessing directory: {}", input.path().display());
    }
}
