//! Progress-callback trait for per-file conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the orchestrator works through its files. The `pdf2md` binary
//! uses it to drive a spinner and print one status line per file; library
//! callers can forward the same events anywhere else.
//!
//! # Example
//!
//! ```rust
//! use pdf2md::{ConversionProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     saved: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, input: &Path, output: &Path) {
//!         self.saved.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{} -> {}", input.display(), output.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { saved: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::FileError;
use std::path::Path;
use std::sync::Arc;

/// Called by the orchestrator as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Batch events fire only for directory runs.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after discovery, before the first file of a directory run.
    ///
    /// `total_files` is zero when the directory holds no PDFs.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called when a file enters the pipeline.
    ///
    /// # Arguments
    /// * `input`: the PDF being converted
    /// * `index`: 1-indexed position in the run
    /// * `total`: number of files in the run (1 for single-file mode)
    fn on_file_start(&self, input: &Path, index: usize, total: usize) {
        let _ = (input, index, total);
    }

    /// Called just before the extracted text is sent to the model (AI mode only).
    fn on_formatting(&self, input: &Path) {
        let _ = input;
    }

    /// Called when the Markdown has been written.
    fn on_file_complete(&self, input: &Path, output: &Path) {
        let _ = (input, output);
    }

    /// Called when a file's conversion is abandoned.
    fn on_file_error(&self, input: &Path, error: &FileError) {
        let _ = (input, error);
    }

    /// Called once after every file of a directory run has been attempted.
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        last_output: Mutex<Option<PathBuf>>,
        batch_success: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_file_start(&self, _input: &Path, _index: usize, _total: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _input: &Path, output: &Path) {
            self.completes.fetch_add(1, Ordering::SeqCst);
            *self.last_output.lock().unwrap() = Some(output.to_path_buf());
        }

        fn on_file_error(&self, _input: &Path, _error: &FileError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total_files: usize, success_count: usize) {
            self.batch_success.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_file_start(Path::new("a.pdf"), 1, 2);
        cb.on_formatting(Path::new("a.pdf"));
        cb.on_file_complete(Path::new("a.pdf"), Path::new("a.md"));
        cb.on_file_error(Path::new("b.pdf"), &FileError::MissingCredential);
        cb.on_batch_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_file_start(Path::new("a.pdf"), 1, 2);
        tracker.on_file_complete(Path::new("a.pdf"), Path::new("a.md"));
        tracker.on_file_start(Path::new("b.pdf"), 2, 2);
        tracker.on_file_error(
            Path::new("b.pdf"),
            &FileError::ExtractionFailed {
                path: PathBuf::from("b.pdf"),
            },
        );
        tracker.on_batch_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.batch_success.load(Ordering::SeqCst), 1);
        assert_eq!(
            tracker.last_output.lock().unwrap().as_deref(),
            Some(Path::new("a.md"))
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_batch_start(0);
        cb.on_batch_complete(0, 0);
    }
}
