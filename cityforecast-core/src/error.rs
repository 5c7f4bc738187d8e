use thiserror::Error;

/// Everything that can go wrong while resolving a city or fetching a
/// forecast.
///
/// All variants except [`Error::Io`] are recoverable: the interactive loop
/// reports them and asks for a fresh query instead of ending the session.
#[derive(Debug, Error)]
pub enum Error {
    /// The query was empty after trimming; no request was issued.
    #[error("No city name provided, please try again.")]
    EmptyQuery,

    /// The request never completed (DNS, connect, timeout, TLS).
    #[error("Could not reach the weather service ({endpoint}): {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("The weather service answered {status} for the {endpoint} request: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("Could not make sense of the {endpoint} response: {source}")]
    Format {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Terminal I/O failed; there is no way to keep prompting.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the interactive loop should message and re-prompt rather
    /// than abort.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
