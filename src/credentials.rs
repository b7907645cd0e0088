//! Gemini API key resolution.
//!
//! The key is looked up in a fixed priority order and the first non-empty
//! value wins:
//!
//! 1. `--api-key` on the command line
//! 2. the `GEMINI_API_KEY` environment variable
//! 3. a fallback baked in at build time from `PDF2MD_FALLBACK_API_KEY`
//!
//! The build-time fallback is read with `option_env!`, so a binary built
//! without that variable simply has no fallback.

use std::fmt;

/// Environment variable consulted when `--api-key` is absent.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Key captured from `PDF2MD_FALLBACK_API_KEY` when the crate was compiled.
pub const BUILD_TIME_API_KEY: Option<&str> = option_env!("PDF2MD_FALLBACK_API_KEY");

/// Where a credential may come from, in the order it should be queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Value passed by the caller (the `--api-key` flag).
    Explicit(Option<String>),
    /// Named environment variable.
    Environment(String),
    /// Constant injected at compile time.
    BuildTime(Option<&'static str>),
}

/// Which source produced the resolved key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOrigin {
    Explicit,
    Environment,
    BuildTime,
}

impl fmt::Display for CredentialOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CredentialOrigin::Explicit => "--api-key",
            CredentialOrigin::Environment => "environment",
            CredentialOrigin::BuildTime => "build-time fallback",
        })
    }
}

/// A resolved API key. `Debug` never prints the key in clear.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key: String,
    origin: CredentialOrigin,
}

impl Credential {
    pub fn new(key: impl Into<String>, origin: CredentialOrigin) -> Self {
        Self {
            key: key.into(),
            origin,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn origin(&self) -> CredentialOrigin {
        self.origin
    }

    /// Key with everything but the first and last four characters hidden.
    pub fn masked(&self) -> String {
        mask_key(&self.key)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key", &self.masked())
            .field("origin", &self.origin)
            .finish()
    }
}

impl CredentialSource {
    fn lookup(&self) -> Option<Credential> {
        let (value, origin) = match self {
            CredentialSource::Explicit(v) => (v.clone(), CredentialOrigin::Explicit),
            CredentialSource::Environment(var) => {
                (std::env::var(var).ok(), CredentialOrigin::Environment)
            }
            CredentialSource::BuildTime(v) => {
                (v.map(str::to_string), CredentialOrigin::BuildTime)
            }
        };
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| Credential::new(v, origin))
    }
}

/// The standard lookup chain for the CLI.
pub fn default_sources(explicit: Option<String>) -> Vec<CredentialSource> {
    vec![
        CredentialSource::Explicit(explicit),
        CredentialSource::Environment(API_KEY_ENV.to_string()),
        CredentialSource::BuildTime(BUILD_TIME_API_KEY),
    ]
}

/// Query `sources` in order; the first non-empty value wins.
pub fn resolve_credential(sources: &[CredentialSource]) -> Option<Credential> {
    sources.iter().find_map(CredentialSource::lookup)
}

/// Hide a secret for display: `AIza****************wxyz`.
///
/// Keys of eight characters or fewer are masked entirely.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}
