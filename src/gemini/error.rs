//! Error types for the generation gateway
//!
//! Every failure collapses to the same caller-visible fallback path; the
//! taxonomy exists so logs and tests can tell the causes apart.

use thiserror::Error;

/// Errors that can occur when calling the generation endpoint
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No usable API credential is configured; the network call is skipped
    #[error("Gemini API key not configured. Set GEMINI_API_KEY to enable live responses")]
    NoCredential,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body from the API
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Unparseable response: {0}")]
    Parse(String),

    /// Response was empty, too short, or not detailed enough to use
    #[error("Response below the usable length threshold")]
    TooShort,
}

/// Why a response came from the local fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCause {
    NoCredential,
    Network,
    Api,
    Parse,
    TooShort,
}

/// Where a generated value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOrigin {
    /// The hosted endpoint produced it
    Remote,
    /// Local fallback content, with the cause that triggered it
    Fallback(FallbackCause),
}

impl GenerationError {
    /// The fallback cause this error maps to
    pub fn cause(&self) -> FallbackCause {
        match self {
            GenerationError::NoCredential => FallbackCause::NoCredential,
            GenerationError::Request(_) => FallbackCause::Network,
            GenerationError::Api { .. } => FallbackCause::Api,
            GenerationError::Parse(_) => FallbackCause::Parse,
            GenerationError::TooShort => FallbackCause::TooShort,
        }
    }
}

impl ResponseOrigin {
    /// Whether this value came from the hosted endpoint
    pub fn is_remote(&self) -> bool {
        matches!(self, ResponseOrigin::Remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_a_cause() {
        assert_eq!(GenerationError::NoCredential.cause(), FallbackCause::NoCredential);
        assert_eq!(
            GenerationError::Api { status: 500, message: String::new() }.cause(),
            FallbackCause::Api
        );
        assert_eq!(GenerationError::Parse("bad".into()).cause(), FallbackCause::Parse);
        assert_eq!(GenerationError::TooShort.cause(), FallbackCause::TooShort);
    }
}
