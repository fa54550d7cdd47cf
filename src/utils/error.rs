use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThicknessError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed record in \"{source_name}\" line {line}: expected {expected} numeric fields, found {found}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        expected: usize,
        found: usize,
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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Processing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ThicknessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedRecord { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ProcessingError { .. } => ErrorCategory::Processing,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Processing => ErrorSeverity::Critical,
            ErrorCategory::Output => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => {
                "Each horizon record must have exactly 5 numeric fields: iline xline x y depth"
            }
            Self::ValidationError { .. } => "Check the horizon input files for consistency",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the configuration file syntax and values"
            }
            Self::InvalidConfigValueError { .. } => {
                "Correct the highlighted value and run again"
            }
            Self::MissingConfigError { .. } => "Provide the missing setting on the command line or in the config file",
            Self::IoError(_) => "Make sure the input files exist and the output directory is writable",
            Self::ProcessingError { .. } => "Re-run with --verbose and report the log if the problem persists",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Try a different output format or check free disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MalformedRecord {
                source_name, line, ..
            } => format!("Bad file \"{}\" (line {})", source_name, line),
            Self::IoError(e) => format!("File operation failed: {}", e),
            Self::MissingConfigError { field } => format!("Missing required setting: {}", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThicknessError>;
