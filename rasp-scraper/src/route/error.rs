//! Route page error types.

/// Errors from fetching or assembling a route results page.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Website returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A DOM collection does not line up with the train list
    #[error("{collection}: expected {expected} entries to match the train list, found {found}")]
    Misaligned {
        collection: &'static str,
        expected: usize,
        found: usize,
    },
}
