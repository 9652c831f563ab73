use thiserror::Error;

/// Ways a single weather lookup can fail before a body could be inspected.
///
/// A body that parses but has the wrong shape is not an error: it surfaces
/// as `Ok(None)` from [`crate::WeatherProvider::current`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connect, TLS or any other transport failure.
    #[error("Failed to send request to {endpoint}: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body was not JSON (e.g. an HTML error page from a proxy).
    #[error("Response was not valid JSON (status {status}): {body}")]
    Decode { status: u16, body: String },
}
