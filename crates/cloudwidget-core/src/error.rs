//! Error types module
//!
//! Errors raised around the upload widget: option handling, host invocation,
//! configuration and listener dispatch. Malformed callback payloads are never
//! errors; the normalizer absorbs them field by field.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like bad user input
    Debug,
    /// Warning level - for recoverable issues like a missing host script
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Upload widget host unavailable: {0}")]
    HostUnavailable(String),

    #[error("Upload widget invocation failed: {0}")]
    HostInvocation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Listener failed")]
    Listener {
        #[source]
        source: anyhow::Error,
    },
}

impl From<validator::ValidationErrors> for WidgetError {
    fn from(err: validator::ValidationErrors) -> Self {
        WidgetError::Config(format!("Validation error: {}", err))
    }
}

impl WidgetError {
    /// Machine-readable error code (e.g., "HOST_UNAVAILABLE")
    pub fn error_code(&self) -> &'static str {
        match self {
            WidgetError::InvalidOptions(_) => "INVALID_OPTIONS",
            WidgetError::HostUnavailable(_) => "HOST_UNAVAILABLE",
            WidgetError::HostInvocation(_) => "HOST_INVOCATION_FAILED",
            WidgetError::Config(_) => "CONFIG_ERROR",
            WidgetError::Serialization(_) => "SERIALIZATION_ERROR",
            WidgetError::Listener { .. } => "LISTENER_FAILED",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            WidgetError::InvalidOptions(_) | WidgetError::Config(_) => LogLevel::Debug,
            WidgetError::HostUnavailable(_) => LogLevel::Warn,
            WidgetError::HostInvocation(_)
            | WidgetError::Serialization(_)
            | WidgetError::Listener { .. } => LogLevel::Error,
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_and_level_host_unavailable() {
        let err = WidgetError::HostUnavailable("window.cloudinary is undefined".to_string());
        assert_eq!(err.error_code(), "HOST_UNAVAILABLE");
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(err.to_string().contains("window.cloudinary"));
    }

    #[test]
    fn test_detailed_message_includes_listener_cause() {
        let err = WidgetError::Listener {
            source: anyhow::anyhow!("gallery refresh failed"),
        };
        assert_eq!(err.error_code(), "LISTENER_FAILED");
        let details = err.detailed_message();
        assert!(details.starts_with("Listener failed"));
        assert!(details.contains("Caused by: gallery refresh failed"));
    }

    #[test]
    fn test_serialization_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WidgetError::from(parse_err);
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
