//! Input resolution: classify the CLI argument and discover PDFs.
//!
//! A missing input is the one input problem that stops the whole run. Inside
//! a directory tree, unreadable subdirectories are skipped with a warning so
//! one bad folder does not hide every other PDF.

use crate::error::Pdf2MdError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What the user pointed us at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A single file, converted on its own.
    File(PathBuf),
    /// A directory, searched recursively for PDFs.
    Directory(PathBuf),
}

impl InputKind {
    pub fn path(&self) -> &Path {
        match self {
            InputKind::File(p) | InputKind::Directory(p) => p,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, InputKind::Directory(_))
    }
}

/// Classify `path` as a file or directory.
///
/// # Errors
/// - [`Pdf2MdError::InputNotFound`] when nothing exists at `path`
/// - [`Pdf2MdError::UnsupportedInput`] for sockets, FIFOs and the like
pub fn resolve_input(path: impl AsRef<Path>) -> Result<InputKind, Pdf2MdError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(Pdf2MdError::InputNotFound { path });
    }
    if path.is_file() {
        debug!("Resolved input file: {}", path.display());
        Ok(InputKind::File(path))
    } else if path.is_dir() {
        debug!("Resolved input directory: {}", path.display());
        Ok(InputKind::Directory(path))
    } else {
        Err(Pdf2MdError::UnsupportedInput { path })
    }
}

/// True when `path` has a `.pdf` extension, in any letter case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Recursively collect every PDF under `dir`, sorted for a stable order.
///
/// Never fails: a directory that cannot be listed (the root included) is
/// skipped with a warning, so an unreadable tree simply yields no files.
/// Symlinked directories are not descended into; symlinked PDF files are
/// collected like regular ones.
pub fn discover_pdfs(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_pdfs(dir, &mut files);
    files.sort();
    debug!("Discovered {} PDF files under {}", files.len(), dir.display());
    files
}

fn collect_pdfs(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping unreadable directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            collect_pdfs(&path, files);
        } else if file_type.is_symlink() {
            if path.is_dir() {
                debug!("Not following directory symlink {}", path.display());
            } else if path.is_file() && is_pdf(&path) {
                files.push(path);
            }
        } else if file_type.is_file() && is_pdf(&path) {
            files.push(path);
        }
    }
}
