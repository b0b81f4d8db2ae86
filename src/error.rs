//! Error types for driver onboarding.

/// Top-level error type for the onboarding core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Driver API error: {0}")]
    DriverApi(#[from] DriverApiError),

    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures talking to the remote account service.
#[derive(Debug, thiserror::Error)]
pub enum DriverApiError {
    #[error("Driver request failed: {reason}")]
    Request { reason: String },

    #[error("Driver service returned HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid driver response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Driver service rejected the token")]
    Unauthorized,
}

impl From<reqwest::Error> for DriverApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse {
                reason: e.to_string(),
            }
        } else {
            Self::Request {
                reason: e.to_string(),
            }
        }
    }
}

/// Platform permission and location provider errors.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("Platform call for {permission} failed: {reason}")]
    PlatformCall { permission: String, reason: String },

    #[error("Location provider failed: {reason}")]
    LocationProvider { reason: String },
}

/// Errors raised inside the gate chain.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("Driver record has unrecognized state '{state}'")]
    InvalidDriverState { state: String },
}

impl RoutingError {
    /// Whether this error points at corrupt driver data rather than a normal
    /// auth outcome.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::InvalidDriverState { .. })
    }
}

/// Result type alias for the onboarding core.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_is_data_integrity() {
        let err = RoutingError::InvalidDriverState {
            state: "suspended".into(),
        };
        assert!(err.is_data_integrity());
        assert_eq!(
            err.to_string(),
            "Driver record has unrecognized state 'suspended'"
        );
    }

    #[test]
    fn nested_errors_convert_into_top_level() {
        let err: Error = DriverApiError::Status { status: 502 }.into();
        assert!(matches!(err, Error::DriverApi(DriverApiError::Status { status: 502 })));
        assert_eq!(
            err.to_string(),
            "Driver API error: Driver service returned HTTP 502"
        );
    }

    #[test]
    fn platform_call_message_names_permission() {
        let err = PermissionError::PlatformCall {
            permission: "android.permission.CAMERA".into(),
            reason: "activity detached".into(),
        };
        assert_eq!(
            err.to_string(),
            "Platform call for android.permission.CAMERA failed: activity detached"
        );
    }
}
