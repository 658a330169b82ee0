use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("store \"{store_id}\" is not registered")]
    UnknownStore { store_id: String },

    #[error("store \"{store_id}\" is already registered")]
    DuplicateStore { store_id: String },

    #[error("invalid product URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("giving up on {url} after {attempts} attempts: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<ScraperError>,
    },
}

impl ScraperError {
    /// Transport-level failures worth another attempt.
    ///
    /// Connection errors, timeouts and every non-2xx status are retried;
    /// URL and registry errors are terminal.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
        )
    }
}
