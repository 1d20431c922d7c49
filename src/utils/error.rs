use thiserror::Error;

/// Status classifications used by the bundled backends. They follow HTTP
/// semantics so a REST backend can pass server codes through untouched.
pub mod status {
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const INTERNAL: u16 = 500;
    pub const BAD_GATEWAY: u16 = 502;
    pub const UNAVAILABLE: u16 = 503;
    pub const TIMEOUT: u16 = 504;
}

/// The one failure every `CarService` operation can report.
///
/// `message` is what callers see through `Display`; `original_message`
/// keeps the lower-level cause so it can be logged without being shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
    status: u16,
    original_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidRequest,
    NotFound,
    Conflict,
    Backend,
    Unknown,
}

impl ServiceError {
    pub fn new(
        message: impl Into<String>,
        status: u16,
        original_message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            status,
            original_message: original_message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::BAD_REQUEST, original_message)
    }

    pub fn not_found(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::NOT_FOUND, original_message)
    }

    pub fn conflict(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::CONFLICT, original_message)
    }

    pub fn internal(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::INTERNAL, original_message)
    }

    pub fn bad_gateway(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::BAD_GATEWAY, original_message)
    }

    pub fn unavailable(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::UNAVAILABLE, original_message)
    }

    pub fn timeout(message: impl Into<String>, original_message: impl Into<String>) -> Self {
        Self::new(message, status::TIMEOUT, original_message)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn original_message(&self) -> &str {
        &self.original_message
    }

    pub fn category(&self) -> ErrorCategory {
        match self.status {
            status::NOT_FOUND => ErrorCategory::NotFound,
            status::CONFLICT => ErrorCategory::Conflict,
            400..=499 => ErrorCategory::InvalidRequest,
            500..=599 => ErrorCategory::Backend,
            _ => ErrorCategory::Unknown,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidRequest => "Check the car fields and id, then retry",
            ErrorCategory::NotFound => "List the cars to find a valid id",
            ErrorCategory::Conflict => "Fetch the current record and retry the change",
            ErrorCategory::Backend => "Check that the backend is reachable and healthy",
            ErrorCategory::Unknown => "Inspect the original message for details",
        }
    }
}

/// A single failed field check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason} (got '{value}')")]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<FieldError> for ServiceError {
    fn from(err: FieldError) -> Self {
        ServiceError::bad_request(
            format!("invalid car record: {}: {}", err.field, err.reason),
            err.to_string(),
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Invalid configuration value: {0}")]
    InvalidValue(#[from] FieldError),

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_public_message() {
        let err = ServiceError::new("car not found", 404, "no row for id 42");
        assert_eq!(err.to_string(), "car not found");
        assert_eq!(err.status(), 404);
        assert_eq!(err.original_message(), "no row for id 42");
    }

    #[test]
    fn test_category_from_status() {
        assert_eq!(
            ServiceError::bad_request("x", "y").category(),
            ErrorCategory::InvalidRequest
        );
        assert_eq!(ServiceError::not_found("x", "y").category(), ErrorCategory::NotFound);
        assert_eq!(ServiceError::conflict("x", "y").category(), ErrorCategory::Conflict);
        assert_eq!(ServiceError::timeout("x", "y").category(), ErrorCategory::Backend);
        assert_eq!(ServiceError::new("x", 302, "y").category(), ErrorCategory::Unknown);
        assert!(ServiceError::new("x", 422, "y").is_client_error());
        assert!(!ServiceError::internal("x", "y").is_client_error());
    }

    #[test]
    fn test_field_error_becomes_bad_request() {
        let err: ServiceError = FieldError::new("price", -5, "must be at least 0").into();
        assert_eq!(err.status(), status::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid car record: price: must be at least 0");
        assert_eq!(err.original_message(), "price: must be at least 0 (got '-5')");
    }
}
