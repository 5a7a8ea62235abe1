use habitrack_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// Structured error returned to IPC callers
///
/// Carries:
/// - Error code for programmatic handling
/// - Human-readable message
/// - Severity level for UI presentation
/// - Recoverability flag for retry logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (2xxx-6xxx range)
    pub code: u16,

    /// Human-readable error message
    pub message: String,

    /// Error severity level
    pub severity: ErrorSeverity,

    /// Whether the operation can be retried
    pub recoverable: bool,
}

impl CommandError {
    /// Create an error from an error code and message
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    /// Create a generic infrastructure error
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }

    /// Not-found and business-rule rejections are the caller's fault.
    pub fn is_bad_request(&self) -> bool {
        (2000..4000).contains(&self.code) || (6000..7000).contains(&self.code)
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self::infrastructure(message)
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self::infrastructure(message.to_string())
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<sqlx::Error> for CommandError {
    fn from(err: sqlx::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_code(ErrorCode::SerializationError, err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_from_domain_error() {
        let domain_err = DomainError::HabitNotFound("habit 123".to_string());
        let cmd_err: CommandError = domain_err.into();

        assert_eq!(cmd_err.code, 2001);
        assert_eq!(cmd_err.message, "habit 123");
        assert_eq!(cmd_err.severity, ErrorSeverity::Info);
        assert!(!cmd_err.recoverable);
        assert!(cmd_err.is_bad_request());
    }

    #[test]
    fn test_business_rejections_are_bad_requests() {
        let future: CommandError = DomainError::FutureCheckIn("2024-01-11".to_string()).into();
        let unscheduled: CommandError = DomainError::NotScheduled("2024-01-10".to_string()).into();

        assert_eq!(future.code, 3002);
        assert_eq!(unscheduled.code, 3001);
        assert!(future.is_bad_request());
        assert!(unscheduled.is_bad_request());
    }

    #[test]
    fn test_command_error_from_string() {
        let cmd_err: CommandError = "Something went wrong".into();

        assert_eq!(cmd_err.code, 5001);
        assert_eq!(cmd_err.message, "Something went wrong");
        assert_eq!(cmd_err.severity, ErrorSeverity::Error);
        assert!(!cmd_err.is_bad_request());
    }

    #[test]
    fn test_command_error_helpers() {
        assert_eq!(CommandError::validation("Invalid input").code, 6001);
        assert_eq!(CommandError::infrastructure("Service unavailable").code, 5001);
    }
}
