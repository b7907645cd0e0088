//! Output writing: choose the destination and put the Markdown on disk.
//!
//! Writes are atomic: content goes to a `.md.tmp` sibling of the target,
//! which is then renamed over it. An interrupted run leaves either the old
//! file or the new one, never half of the new one.

use crate::error::FileError;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// `<dir>/<stem>.md` for an input at `<dir>/<stem>.<ext>`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension("md")
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file.
///
/// # Errors
/// [`FileError::WriteFailed`] for any I/O problem (permission denied, disk
/// full, a directory in the way). The error is also logged.
pub fn write_markdown(content: &str, path: &Path) -> Result<(), FileError> {
    write_atomic(content, path).map_err(|e| {
        error!("Cannot write {}: {}", path.display(), e);
        FileError::WriteFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }
    })
}

fn write_atomic(content: &str, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("md.tmp");
    let written =
        std::fs::write(&tmp_path, content).and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn derived_path_keeps_stem_and_directory() {
        assert_eq!(
            derive_output_path(Path::new("/data/reports/q3.pdf")),
            PathBuf::from("/data/reports/q3.md")
        );
        assert_eq!(
            derive_output_path(Path::new("docs/SCAN.PDF")),
            PathBuf::from("docs/SCAN.md")
        );
        assert_eq!(
            derive_output_path(Path::new("paper.v2.pdf")),
            PathBuf::from("paper.v2.md")
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c/out.md");
        write_markdown("# Zażółć gęślą jaźń\n", &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "# Zażółć gęślą jaźń\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.md");
        fs::write(&target, "old content that is longer").unwrap();
        write_markdown("new", &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        write_markdown("x", &dir.path().join("out.md")).unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.md")]);
    }

    #[test]
    fn directory_in_the_way_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();

        let err = write_markdown("x", &target).unwrap_err();
        match err {
            FileError::WriteFailed { path, detail } => {
                assert_eq!(path, target);
                assert!(!detail.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_write_removes_the_temporary_file() {
        use std::os::unix::fs::symlink;

        if !Path::new("/dev/full").exists() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.md");
        let tmp = dir.path().join("out.md.tmp");
        // Writes through this link fail with ENOSPC.
        symlink("/dev/full", &tmp).unwrap();

        let err = write_markdown("some content", &target).unwrap_err();
        assert!(matches!(err, FileError::WriteFailed { .. }), "{err:?}");
        assert!(!target.exists());
        assert!(fs::symlink_metadata(&tmp).is_err(), "temporary file left behind");
    }
}
