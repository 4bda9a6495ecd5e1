//! NDBC fetch error types.

/// Errors from retrieving a station report.
///
/// All variants mean the station could not be reached this cycle; none of
/// them say anything about the report's content.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (DNS, connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NDBC answered with something other than 200
    #[error("NDBC returned status {status}")]
    Status { status: u16 },

    /// Transport failure from a non-HTTP source
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// True if the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
