use thiserror::Error;

/// Outcome of a failed weather query.
///
/// Every variant carries a human-readable detail so the caller can show it
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The location cannot be sent to the provider.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Network failure, timeout or a non-2xx status.
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The body is not JSON or lacks an expected field.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// The condition icon could not be downloaded or decoded.
    #[error("Weather icon unavailable: {0}")]
    IconUnavailable(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return WeatherError::RequestFailed("request timed out".to_string());
        }
        // The URL carries the API key.
        let err = err.without_url();
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        WeatherError::RequestFailed(message)
    }
}
