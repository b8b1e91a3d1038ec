//! Error type definitions for the M3U combiner

use thiserror::Error;

/// Top-level application error type
///
/// Anything that reaches `main` as an `AppError` ends the run with a
/// non-zero exit code.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Filesystem errors while reading config or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Reasons a single playlist source could not contribute to the output
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection failures and other transport-level problems
    #[error("Source unavailable: {url} - {message}")]
    Unavailable { url: String, message: String },

    /// Network timeouts
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Non-success HTTP status from the remote
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Locator is not an HTTP(S) URL
    #[error("Invalid source URL: {url} - {message}")]
    InvalidUrl { url: String, message: String },

    /// Body could not be decompressed
    #[error("Decode error: {url} - {message}")]
    Decode { url: String, message: String },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create an unavailable error
    pub fn unavailable<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Unavailable {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_wraps_into_app_error() {
        let err: AppError = SourceError::Http {
            status: 404,
            url: "http://example.com/list.m3u".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Source error: HTTP error: 404 - http://example.com/list.m3u"
        );
    }

    #[test]
    fn test_configuration_helper() {
        let err = AppError::configuration("no sources configured");
        assert!(matches!(err, AppError::Configuration { .. }));
        assert_eq!(err.to_string(), "Configuration error: no sources configured");
    }
}
