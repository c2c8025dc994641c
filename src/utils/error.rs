use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed record in {file} at line {line}: {message}")]
    MalformedRecord {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MatcherError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatcherError::IoError(_) => ErrorCategory::Io,
            MatcherError::SerializationError(_) | MatcherError::MalformedRecord { .. } => {
                ErrorCategory::Data
            }
            MatcherError::ConfigError { .. }
            | MatcherError::ConfigValidationError { .. }
            | MatcherError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MatcherError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MatcherError::MalformedRecord { .. } => ErrorSeverity::Medium,
            MatcherError::ProcessingError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MatcherError::IoError(_) => {
                "Check that the data directory exists and the input files are readable"
            }
            MatcherError::SerializationError(_) => "Check that the records are valid JSON objects",
            MatcherError::MalformedRecord { .. } => {
                "Fix the offending line or rerun with --on-malformed skip"
            }
            MatcherError::ConfigError { .. }
            | MatcherError::ConfigValidationError { .. }
            | MatcherError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again"
            }
            MatcherError::ProcessingError { .. } => "Rerun with --verbose and report the log",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MatcherError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                format!("Input file not found: {}", e)
            }
            MatcherError::MalformedRecord { file, line, .. } => {
                format!("Could not parse record on line {} of {}", line, file)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;
