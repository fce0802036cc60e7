use thiserror::Error;

/// Failures surfaced by the HTTP layer, storage and configuration.
///
/// Every message is safe to render in the UI: bodies are sanitized before they
/// land here and tokens never do.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Session expired: {0}")]
    Unauthorized(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Message without the category prefix, for toasts and inline alerts.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Timeout(message)
            | Self::Unauthorized(message)
            | Self::Parse(message)
            | Self::Serialization(message)
            | Self::Storage(message)
            | Self::Http { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn status_is_reported_for_server_answers_only() {
        let http = AppError::Http {
            status: 422,
            message: "The email field is required.".to_string(),
        };
        assert_eq!(http.status(), Some(422));
        assert_eq!(
            AppError::Unauthorized("Unauthenticated.".to_string()).status(),
            Some(401)
        );
        assert_eq!(AppError::Network("offline".to_string()).status(), None);
    }

    #[test]
    fn display_keeps_category_prefix() {
        let err = AppError::Http {
            status: 500,
            message: "Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (500): Server Error");
        assert_eq!(err.user_message(), "Server Error");
    }
}
