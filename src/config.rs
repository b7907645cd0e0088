//! Configuration types for PDF-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The builder checks the one rule that
//! must hold before any file is touched: AI mode needs a credential.

use crate::credentials::Credential;
use crate::error::Pdf2MdError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model used for AI formatting unless `--model` says otherwise.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// How extracted text becomes Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Write the page-annotated transcript as-is. (default)
    #[default]
    Standalone,
    /// Send the transcript to Gemini and write its Markdown instead.
    Ai,
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConversionMode::Standalone => "standalone",
            ConversionMode::Ai => "ai",
        })
    }
}

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`] (standalone mode).
///
/// # Example
/// ```rust
/// use pdf2md::{ConversionConfig, ConversionMode, Credential, CredentialOrigin};
///
/// let config = ConversionConfig::builder()
///     .mode(ConversionMode::Ai)
///     .credential(Some(Credential::new("AIza-example-key", CredentialOrigin::Explicit)))
///     .model("gemini-2.5-flash")
///     .build()
///     .unwrap();
/// assert_eq!(config.mode, ConversionMode::Ai);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Standalone extraction or AI formatting. Default: standalone.
    pub mode: ConversionMode,

    /// Gemini model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Resolved API key; required when `mode` is [`ConversionMode::Ai`].
    pub credential: Option<Credential>,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            mode: ConversionMode::default(),
            model: DEFAULT_MODEL.to_string(),
            credential: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("mode", &self.mode)
            .field("model", &self.model)
            .field("credential", &self.credential)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn mode(mut self, mode: ConversionMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn credential(mut self, credential: Option<Credential>) -> Self {
        self.config.credential = credential;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2MdError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(Pdf2MdError::InvalidConfig(
                "model identifier must not be empty".into(),
            ));
        }
        if c.mode == ConversionMode::Ai && c.credential.is_none() {
            return Err(Pdf2MdError::MissingCredential);
        }
        Ok(self.config)
    }
}
