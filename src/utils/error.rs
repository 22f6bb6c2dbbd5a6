use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    RemoteOperation { message: String },

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: String, id: i64 },

    #[error("Remote service responded with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The remote service answered and reported a failure.
    Remote,
    /// The request never produced a usable envelope.
    Transport,
    /// Caller-supplied data was rejected before dispatch.
    Input,
    Configuration,
}

impl AdapterError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteOperation {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RemoteOperation { .. } | Self::NotFound { .. } => ErrorCategory::Remote,
            Self::Http(_) | Self::HttpStatus { .. } | Self::Serialization(_) => {
                ErrorCategory::Transport
            }
            Self::InvalidValue { .. } => ErrorCategory::Input,
            Self::Io(_) | Self::ConfigError { .. } | Self::MissingConfig { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Remote => 1,
            ErrorCategory::Input => 2,
            ErrorCategory::Transport => 3,
            ErrorCategory::Configuration => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_service_message() {
        let err = AdapterError::remote("Quota exceeded");
        assert_eq!(err.to_string(), "Quota exceeded");
        assert_eq!(err.category(), ErrorCategory::Remote);
    }

    #[test]
    fn test_exit_codes_follow_category() {
        let not_found = AdapterError::NotFound {
            entity: "crop".to_string(),
            id: 4,
        };
        assert_eq!(not_found.to_string(), "crop with ID 4 not found");
        assert_eq!(not_found.exit_code(), 1);

        let invalid = AdapterError::InvalidValue {
            field: "farmId".to_string(),
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(invalid.exit_code(), 2);

        let missing = AdapterError::MissingConfig {
            field: "APPER_PUBLIC_KEY".to_string(),
        };
        assert_eq!(missing.exit_code(), 4);
    }
}
