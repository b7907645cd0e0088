//! Locate and bind the pdfium shared library.
//!
//! `pdfium-render` only wraps the C library; the `.so`/`.dylib`/`.dll` itself
//! has to be found at runtime. Lookup order (first successful bind wins):
//!
//! 1. `PDFIUM_LIB_PATH`: a library file, or a directory containing one
//! 2. the directory holding the running executable
//! 3. the current working directory
//! 4. the system library search path

use crate::error::Pdf2MdError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at an existing libpdfium.
pub const LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to the first pdfium library found.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2MdError> {
    for candidate in library_candidates() {
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                debug!("Bound pdfium from {}", candidate.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => debug!("pdfium not usable at {}: {:?}", candidate.display(), e),
        }
    }

    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| Pdf2MdError::PdfiumBindingFailed(format!("{:?}", e)))?;
    debug!("Bound system pdfium library");
    Ok(Pdfium::new(bindings))
}

/// Library files worth trying before the system search path, in order.
fn library_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(p) = std::env::var(LIB_PATH_ENV) {
        if !p.is_empty() {
            candidates.push(library_file(Path::new(&p)));
        }
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(library_file(&dir));
    }
    candidates.push(library_file(Path::new(".")));

    candidates.retain(|p| p.is_file());
    candidates.dedup();
    candidates
}

/// Resolve a user-supplied location to a library file: directories get the
/// platform library name appended, anything else is taken as the file itself.
fn library_file(location: &Path) -> PathBuf {
    if location.is_dir() {
        location.join(Pdfium::pdfium_platform_library_name())
    } else {
        location.to_path_buf()
    }
}
