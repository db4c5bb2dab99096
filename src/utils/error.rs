use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("Missing fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("Invalid cuisine: {name}")]
    InvalidCuisine { name: String },

    #[error("One or more tags is invalid ({resolved} of {requested} resolved)")]
    InvalidTags { requested: usize, resolved: usize },

    #[error("Recipe not found: {id}")]
    NotFound { id: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Storage,
    Configuration,
}

impl CatalogueError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedPayload { .. }
            | Self::MissingFields { .. }
            | Self::InvalidCuisine { .. }
            | Self::InvalidTags { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::StoreUnavailable { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Whether the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::NotFound
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage | ErrorCategory::Configuration => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedPayload { .. } => "Send the recipe as a JSON object",
            Self::MissingFields { .. } => "Provide every recipe field with a non-empty value",
            Self::InvalidCuisine { .. } => "Use the name of an existing cuisine",
            Self::InvalidTags { .. } => "Use only names of existing tags",
            Self::NotFound { .. } => "Check the recipe identifier",
            Self::StoreUnavailable { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                "Check that the snapshot location is readable and writable"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Check the configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
