use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    #[error("GraphQL query returned errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("Unexpected response shape: {message}")]
    DataShape { message: String },

    #[error("Board {board_id} not found")]
    BoardNotFound { board_id: String },

    #[error("Board has more than {limit} items and max_items was reached")]
    Truncated { limit: usize },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
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
    Network,
    Api,
    Data,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::Transport(_) => ErrorCategory::Network,
            ExportError::Request { .. } | ExportError::GraphQl { .. } => ErrorCategory::Api,
            ExportError::DataShape { .. }
            | ExportError::BoardNotFound { .. }
            | ExportError::Truncated { .. }
            | ExportError::CsvError(_)
            | ExportError::SerializationError(_) => ErrorCategory::Data,
            ExportError::IoError(_) => ErrorCategory::Io,
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路或伺服器暫時性錯誤，可重試
            ExportError::Transport(_) => ErrorSeverity::Medium,
            ExportError::Request { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            ExportError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ExportError::Transport(_) => {
                "Check network connectivity or raise --timeout-secs".to_string()
            }
            ExportError::Request { status: 401, .. } | ExportError::Request { status: 403, .. } => {
                "Check that MONDAY_API_TOKEN is valid and has read access to the board".to_string()
            }
            ExportError::Request { .. } => "Retry later; the API rejected the request".to_string(),
            ExportError::GraphQl { .. } => {
                "Check the board id and the token's permissions".to_string()
            }
            ExportError::BoardNotFound { .. } => {
                "Verify MONDAY_BOARD_ID points to an existing board".to_string()
            }
            ExportError::Truncated { .. } => {
                "Raise --max-items or remove it to export the whole board".to_string()
            }
            ExportError::DataShape { .. }
            | ExportError::CsvError(_)
            | ExportError::SerializationError(_) => {
                "Run with --verbose and inspect the API response".to_string()
            }
            ExportError::IoError(_) => "Check that --output-path is writable".to_string(),
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. }
            | ExportError::MissingConfigError { .. } => {
                "Check command line flags, environment variables and the config file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the API: {}", self),
            ErrorCategory::Api => format!("The API returned an error: {}", self),
            ErrorCategory::Data => format!("Board data could not be processed: {}", self),
            ErrorCategory::Io => format!("Could not write output files: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Failure modes of the sync trigger. They all end up as one error log line,
/// but stay distinct so logs can tell them apart.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("sync endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("sync endpoint returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("sync response is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

impl SyncError {
    pub fn category(&self) -> &'static str {
        match self {
            SyncError::Transport(_) => "transport",
            SyncError::RemoteStatus { .. } => "remote_status",
            SyncError::Parse(_) => "parse",
        }
    }
}
