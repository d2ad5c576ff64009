//! OSRM client error types.

/// Errors from a full route request.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The service answered but found no drivable route.
    #[error("no route found")]
    NoRouteFound,

    /// The service returned an error status or refused the request.
    #[error("routing service unavailable ({status}): {message}")]
    ServiceUnavailable { status: u16, message: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("invalid routing response: {message}")]
    InvalidResponse { message: String },
}

impl RouteError {
    /// Whether the failure came from the service rather than the request.
    pub fn is_service_side(&self) -> bool {
        matches!(
            self,
            RouteError::ServiceUnavailable { .. } | RouteError::InvalidResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(RouteError::NoRouteFound.to_string(), "no route found");

        let err = RouteError::ServiceUnavailable {
            status: 429,
            message: "Too Many Requests".into(),
        };
        assert_eq!(
            err.to_string(),
            "routing service unavailable (429): Too Many Requests"
        );
        assert!(err.is_service_side());
        assert!(!RouteError::NoRouteFound.is_service_side());
    }
}
