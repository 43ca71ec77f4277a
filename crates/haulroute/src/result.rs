//! Result and error types for haulroute.

use thiserror::Error;

/// Result type for haulroute operations
pub type HaulrouteResult<T> = Result<T, HaulrouteError>;

/// Errors that can occur in haulroute
#[derive(Debug, Error)]
pub enum HaulrouteError {
    /// Configuration value out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// Drawing surface cannot hold a layout
    #[error("Invalid surface size {width}x{height}")]
    InvalidSurface {
        /// Surface width
        width: f64,
        /// Surface height
        height: f64,
    },

    /// Route input could not be interpreted
    #[error("Invalid route: {message}")]
    InvalidRoute {
        /// Error message
        message: String,
    },

    /// Persisted application context is unusable
    #[error("Context store error: {message}")]
    Store {
        /// Error message
        message: String,
    },

    /// Host environment (browser canvas, window) unavailable
    #[error("Host error: {message}")]
    Host {
        /// Error message
        message: String,
    },

    /// Frame export (SVG) failed
    #[error("Export error: {message}")]
    Export {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HaulrouteError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid route error
    #[must_use]
    pub fn invalid_route(message: impl Into<String>) -> Self {
        Self::InvalidRoute {
            message: message.into(),
        }
    }

    /// Create a host error
    #[must_use]
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HaulrouteError::invalid_config("step must be positive");
        assert_eq!(err.to_string(), "Invalid configuration: step must be positive");

        let err = HaulrouteError::InvalidSurface {
            width: 0.0,
            height: 300.0,
        };
        assert_eq!(err.to_string(), "Invalid surface size 0x300");
    }

    #[test]
    fn test_json_error_converts() {
        fn parse() -> HaulrouteResult<serde_json::Value> {
            Ok(serde_json::from_str("{not json")?)
        }
        assert!(matches!(parse(), Err(HaulrouteError::Json(_))));
    }
}
