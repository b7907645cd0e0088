//! Pipeline stages for PDF-to-Markdown conversion.
//!
//! Each submodule implements exactly one step, and each step reports failure
//! as a value rather than a panic so the orchestrator in [`crate::convert`]
//! can decide whether to skip the file, degrade, or carry on.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ llm (ai mode) ──▶ output
//! (path)    (pdfium)    (Gemini)          (.md file)
//! ```
//!
//! 1. [`input`]: classify the argument; find PDFs under a directory
//! 2. [`extract`]: per-page text with `## Page <n>` markers
//! 3. [`llm`]: optional reformatting; falls back to the input text
//! 4. [`output`]: derive `<stem>.md` and write it atomically

pub mod extract;
pub mod input;
pub mod llm;
pub mod output;
