use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("No markdown file found for {language} in {}", dir.display())]
    MarkdownNotFound { language: String, dir: PathBuf },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error at {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not valid UTF-8: {source}", path.display())]
    InvalidEncoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid dataset {}: {reason}", path.display())]
    InvalidDataset { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Config,
    System,
}

impl EtlError {
    /// Builds an IO error, mapping `NotFound` to [`EtlError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            EtlError::FileNotFound { path }
        } else {
            EtlError::IoError { path, source }
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        EtlError::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_dataset(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        EtlError::InvalidDataset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MarkdownNotFound { .. } | EtlError::FileNotFound { .. } => {
                ErrorCategory::Input
            }
            EtlError::JsonError { .. }
            | EtlError::InvalidEncoding { .. }
            | EtlError::SerializationError(_)
            | EtlError::InvalidDataset { .. } => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Config,
            EtlError::IoError { .. } => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MarkdownNotFound { .. } => {
                "Name the file <category>.md, <category>_<language>.md or <category>-<language>.md"
            }
            EtlError::FileNotFound { .. } => "Check that the path exists and is spelled correctly",
            EtlError::JsonError { .. } => "Fix the JSON syntax in the file and run again",
            EtlError::InvalidEncoding { .. } => "Re-save the markdown file as UTF-8",
            EtlError::InvalidDataset { .. } => {
                "The dataset must be a JSON object with a top-level \"profiles\" array"
            }
            EtlError::SerializationError(_) => "Report the profile that failed to serialize",
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Check the command-line flags and the config file values"
            }
            EtlError::MissingConfigError { .. } => {
                "Pass the value on the command line or set it in the config file"
            }
            EtlError::IoError { .. } => "Check file permissions and free disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
