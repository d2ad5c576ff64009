//! Overpass API error types.

/// Errors that can occur when querying the Overpass API.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Too many requests from this client
    #[error("rate limited by Overpass API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OverpassError::Api {
            status: 504,
            message: "Gateway Timeout".into(),
        };
        assert_eq!(err.to_string(), "API error 504: Gateway Timeout");

        let err = OverpassError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by Overpass API");

        let err = OverpassError::Json {
            message: "expected value".into(),
        };
        assert!(err.to_string().contains("expected value"));
    }
}
