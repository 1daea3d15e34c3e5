//! Error types for route planning.
//!
//! `RouteError` rejects a request before any work starts. `ProviderError`
//! describes why a single directions call failed; it never aborts a batch.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RouteError {
    #[error("at least one waypoint is required")]
    EmptyWaypoints,
    #[error("waypoint {index} has a non-finite coordinate ({lat}, {lng})")]
    NonFiniteCoordinate { index: usize, lat: f64, lng: f64 },
    #[error("waypoint {index} is out of range ({lat}, {lng})")]
    CoordinateOutOfRange { index: usize, lat: f64, lng: f64 },
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, RouteError>;

impl RouteError {
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }
}

#[derive(Debug, ThisError)]
pub enum ProviderError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {code}: {message}")]
    Status { code: String, message: String },
    #[error("provider found no route")]
    NoRoute,
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(err) => err.is_timeout() || err.is_connect(),
            ProviderError::Unavailable(_) => true,
            ProviderError::Status { .. }
            | ProviderError::NoRoute
            | ProviderError::InvalidResponse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_messages() {
        let err = RouteError::NonFiniteCoordinate {
            index: 3,
            lat: f64::NAN,
            lng: 1.0,
        };
        assert!(err.to_string().contains("waypoint 3"));
        assert!(RouteError::invalid_options("bad").to_string().contains("bad"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ProviderError::unavailable("503").is_retryable());
        assert!(!ProviderError::NoRoute.is_retryable());
        assert!(!ProviderError::InvalidResponse("x".into()).is_retryable());
    }
}
