//! Text extraction: PDF → page-annotated plain-text transcript.
//!
//! Parsing sits behind [`PageTextSource`] so the transcript rules can be
//! exercised without a pdfium library; [`PdfiumSource`] is the production
//! backend.
//!
//! ## Transcript layout
//!
//! Every page with non-whitespace text contributes a `## Page <n>` marker,
//! its raw text and a blank separator. `<n>` is the page's position in the
//! document, so a run of blank pages never shifts the numbers of the pages
//! after it:
//!
//! ```text
//! ## Page 2
//!
//! …text of page 2…
//!
//!
//! ## Page 4
//!
//! …text of page 4…
//! ```

use crate::engine;
use crate::error::{ExtractError, Pdf2MdError};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, error};

/// Raw text of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-indexed position in the document.
    pub page_num: usize,
    pub text: String,
}

/// Document-parsing backend: open a PDF and return each page's plain text.
pub trait PageTextSource {
    /// Plain text of every page, in document order (empty pages included).
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Backend reading PDFs through pdfium.
pub struct PdfiumSource {
    pdfium: Pdfium,
}

impl PdfiumSource {
    /// Bind the pdfium library (see [`crate::engine`] for the lookup order).
    pub fn bind() -> Result<Self, Pdf2MdError> {
        Ok(Self {
            pdfium: engine::bind_pdfium()?,
        })
    }
}

impl PageTextSource for PdfiumSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let document =
            self.pdfium
                .load_pdf_from_file(path, None)
                .map_err(|e| ExtractError::Open {
                    path: path.to_path_buf(),
                    detail: format!("{:?}", e),
                })?;

        let pages = document.pages();
        let mut texts = Vec::with_capacity(pages.len() as usize);
        for (idx, page) in pages.iter().enumerate() {
            let text = page.text().map_err(|e| ExtractError::Page {
                path: path.to_path_buf(),
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;
            texts.push(text.all());
        }
        Ok(texts)
    }
}

/// Read every page of `path`, numbering pages from 1.
///
/// pdfium separates lines with `\r\n`; they come back as `\n`.
pub fn read_pages(
    source: &dyn PageTextSource,
    path: &Path,
) -> Result<Vec<PageText>, ExtractError> {
    let pages: Vec<PageText> = source
        .page_texts(path)?
        .into_iter()
        .enumerate()
        .map(|(idx, text)| PageText {
            page_num: idx + 1,
            text: text.replace("\r\n", "\n"),
        })
        .collect();
    debug!("Read {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// Render pages into the transcript, skipping whitespace-only pages.
pub fn render_transcript(pages: &[PageText]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for page in pages.iter().filter(|p| !p.text.trim().is_empty()) {
        parts.push(format!("## Page {}\n", page.page_num));
        parts.push(page.text.clone());
        parts.push("\n".to_string());
    }
    parts.join("\n")
}

/// Extract the page-annotated transcript of `path`.
///
/// Never fails: any parsing error is logged with the path and the
/// underlying message, and the result is an empty string. Callers treat an
/// empty transcript as "extraction failed".
pub fn extract_text(source: &dyn PageTextSource, path: &Path) -> String {
    match read_pages(source, path) {
        Ok(pages) => render_transcript(&pages),
        Err(e) => {
            error!("Could not extract text from {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FixedPages(Vec<&'static str>);

    impl PageTextSource for FixedPages {
        fn page_texts(&self, _path: &Path) -> Result<Vec<String>, ExtractError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct Corrupt;

    impl PageTextSource for Corrupt {
        fn page_texts(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
            Err(ExtractError::Open {
                path: path.to_path_buf(),
                detail: "PdfiumLibraryInternalError(FormatError)".into(),
            })
        }
    }

    #[test]
    fn exact_layout_for_two_pages() {
        let source = FixedPages(vec!["Hello\n", "World\n"]);
        let out = extract_text(&source, Path::new("doc.pdf"));
        assert_eq!(
            out,
            "## Page 1\n\nHello\n\n\n\n## Page 2\n\nWorld\n\n\n"
        );
    }

    #[test]
    fn crlf_line_endings_are_normalised() {
        let source = FixedPages(vec!["Title\r\nfirst line\r\nsecond line"]);
        let out = extract_text(&source, Path::new("doc.pdf"));
        assert!(!out.contains('\r'), "{out:?}");
        assert_eq!(out, "## Page 1\n\nTitle\nfirst line\nsecond line\n\n");
    }

    #[test]
    fn blank_pages_keep_document_numbering() {
        let source = FixedPages(vec!["", "second", "  \n\t ", "fourth"]);
        let out = extract_text(&source, Path::new("doc.pdf"));

        let headers: Vec<&str> = out.lines().filter(|l| l.starts_with("## ")).collect();
        assert_eq!(headers, vec!["## Page 2", "## Page 4"]);
        assert!(!out.contains("## Page 1"));
        assert!(!out.contains("## Page 3"));
    }

    #[test]
    fn all_blank_document_is_empty() {
        let source = FixedPages(vec!["", "   ", "\n"]);
        assert_eq!(extract_text(&source, Path::new("scan.pdf")), "");
    }

    #[test]
    fn open_failure_yields_empty_string() {
        assert_eq!(extract_text(&Corrupt, Path::new("broken.pdf")), "");
    }

    #[test]
    fn read_pages_numbers_from_one() {
        let pages = read_pages(&FixedPages(vec!["a", "b"]), Path::new("x.pdf")).unwrap();
        assert_eq!(
            pages,
            vec![
                PageText {
                    page_num: 1,
                    text: "a".into()
                },
                PageText {
                    page_num: 2,
                    text: "b".into()
                },
            ]
        );
    }

    #[test]
    fn read_pages_propagates_backend_error() {
        let err = read_pages(&Corrupt, Path::new("broken.pdf")).unwrap_err();
        match err {
            ExtractError::Open { path, .. } => assert_eq!(path, PathBuf::from("broken.pdf")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
