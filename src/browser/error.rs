//! Error types for web engines.

use thiserror::Error;

/// Errors a [`WebEngine`](super::WebEngine) can report while loading a page.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The navigation policy refused the URL (non-HTTP scheme or unparseable).
    #[error("navigation to {url} vetoed: only http and https pages can be loaded")]
    NavigationVetoed {
        /// The refused URL.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error loading {url}: {source}")]
    Network {
        /// The URL that failed to load.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout loading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl EngineError {
    pub(crate) fn from_request(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source: error,
            }
        }
    }
}
