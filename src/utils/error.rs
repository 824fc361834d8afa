use thiserror::Error;

/// Failure of a store operation. Returned by every [`Store`](crate::domain::ports::Store)
/// backend and passed through the service untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found: {id}")]
    NotFound { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AppError::ConfigError { .. }
                | AppError::ConfigValidationError { .. }
                | AppError::InvalidConfigValueError { .. }
                | AppError::MissingConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::ConfigError { .. } | AppError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax and section names".to_string()
            }
            AppError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the config file or on the command line", field)
            }
            AppError::MissingConfigError { field } => {
                format!("Provide '{}' in the config file or on the command line", field)
            }
            AppError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AppError::SerializationError(_) => "Check that the input is valid JSON".to_string(),
            AppError::Store(StoreError::NotFound { .. }) => {
                "Create the user first or check the id".to_string()
            }
            AppError::Store(_) => "Check the store path and its permissions".to_string(),
        }
    }

    /// 1 for configuration problems, 2 for everything that happened at run time.
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            1
        } else {
            2
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
