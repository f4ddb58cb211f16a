use thiserror::Error;

/// Low-level failure talking to the provider: the request never completed,
/// or the body was not the JSON we expected.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything a refresh can fail with. All variants are recovered at the
/// dashboard boundary and surfaced as a transient message; none end the
/// session.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No location text was submitted; rejected before any network call.
    #[error("no location given")]
    EmptyInput,

    /// The provider answered but could not resolve the location. Carries
    /// the provider's own message.
    #[error("{message}")]
    LocationNotFound { message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}
