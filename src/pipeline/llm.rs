//! AI formatting: send the transcript to Gemini and return its Markdown.
//!
//! The formatter never fails a conversion. Every problem, including a build
//! without the `ai` feature, is logged and the original text is returned
//! unchanged, so AI mode at worst produces what standalone mode would have.
//!
//! Prompt text lives in [`crate::prompts`]; this module only drives the call.
//! No retry loop and no client-side timeout.

use crate::error::FormatError;
use crate::prompts::format_prompt;
use futures::future::LocalBoxFuture;
use tracing::{debug, error};

/// Remote text-generation backend.
pub trait TextGenerator {
    /// Send `prompt` and return the model's text response.
    fn generate<'a>(&'a self, prompt: &'a str) -> LocalBoxFuture<'a, Result<String, FormatError>>;
}

/// Whether this build carries the remote-API client.
///
/// Fixed at compile time by the `ai` cargo feature. AI mode is gated on this
/// flag, so a missing client is reported as [`FormatError::Unavailable`]
/// rather than surfacing as a failed network call.
pub const fn ai_available() -> bool {
    cfg!(feature = "ai")
}

/// Ask the model to reformat `text`.
///
/// `generator` is `None` when no client could be built for this run.
pub async fn try_format(
    generator: Option<&dyn TextGenerator>,
    text: &str,
) -> Result<String, FormatError> {
    let generator = generator.ok_or(FormatError::Unavailable)?;
    let prompt = format_prompt(text);
    debug!("Sending {} chars to the model", prompt.len());

    let markdown = generator.generate(&prompt).await?;
    if markdown.trim().is_empty() {
        return Err(FormatError::EmptyResponse);
    }
    debug!("Model returned {} chars", markdown.len());
    Ok(markdown)
}

/// Reformat `text`, falling back to `text` itself on any failure.
pub async fn format_markdown(generator: Option<&dyn TextGenerator>, text: &str) -> String {
    match try_format(generator, text).await {
        Ok(markdown) => markdown,
        Err(e) => {
            error!("{e}; keeping the unformatted text");
            text.to_string()
        }
    }
}

#[cfg(feature = "ai")]
pub use gemini::LlmGenerator;

#[cfg(feature = "ai")]
mod gemini {
    use super::TextGenerator;
    use crate::credentials::{Credential, API_KEY_ENV};
    use crate::error::{FormatError, Pdf2MdError};
    use edgequake_llm::{ChatMessage, LLMProvider, ProviderFactory};
    use futures::future::{FutureExt, LocalBoxFuture};
    use std::sync::Arc;
    use tracing::debug;

    /// [`TextGenerator`] backed by an `edgequake-llm` provider.
    pub struct LlmGenerator {
        provider: Arc<dyn LLMProvider>,
    }

    impl LlmGenerator {
        /// Wrap a pre-constructed provider.
        pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
            Self { provider }
        }

        /// Build a Gemini provider for `model` authenticated with `credential`.
        ///
        /// The provider factory reads its key from `GEMINI_API_KEY`, so a key
        /// that came from `--api-key` or the build-time fallback is exported
        /// there first. Call this before spawning any other threads.
        pub fn gemini(credential: &Credential, model: &str) -> Result<Self, Pdf2MdError> {
            if std::env::var(API_KEY_ENV).ok().as_deref() != Some(credential.key()) {
                std::env::set_var(API_KEY_ENV, credential.key());
            }
            debug!(
                "Creating gemini provider (model {}, key {} from {})",
                model,
                credential.masked(),
                credential.origin()
            );

            let provider = ProviderFactory::create_llm_provider("gemini", model).map_err(|e| {
                Pdf2MdError::ProviderNotConfigured {
                    provider: "gemini".to_string(),
                    hint: format!("{e}"),
                }
            })?;
            Ok(Self::new(provider))
        }
    }

    impl TextGenerator for LlmGenerator {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
        ) -> LocalBoxFuture<'a, Result<String, FormatError>> {
            async move {
                let messages = vec![ChatMessage::user(prompt)];
                let response = self
                    .provider
                    .chat(&messages, None)
                    .await
                    .map_err(|e| FormatError::Provider(format!("{}", e)))?;
                debug!(
                    "Gemini: {} input tokens, {} output tokens",
                    response.prompt_tokens, response.completion_tokens
                );
                Ok(response.content)
            }
            .boxed_local()
        }
    }
}
