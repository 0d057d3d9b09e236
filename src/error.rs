use thiserror::Error;

pub type Result<T> = std::result::Result<T, QgetError>;

#[derive(Debug, Error)]
pub enum QgetError {
    /// The untyped entrypoint was handed something other than a string.
    /// Surfaced before any network activity.
    #[error("URL must be a string.")]
    UrlNotString,

    /// The response arrived with a status other than `200 OK`. Redirects
    /// and other 2xx codes land here too; only the exact match succeeds.
    #[error("HTTP Error Response: {code} {reason} ({url})")]
    Status {
        code: u16,
        reason: String,
        url: String,
    },

    /// Connection, DNS, TLS or mid-stream failure in the underlying
    /// client, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/* Conversions so `?` works smoothly */
impl From<std::io::Error> for QgetError {
    fn from(e: std::io::Error) -> Self {
        QgetError::Other(e.to_string())
    }
}
