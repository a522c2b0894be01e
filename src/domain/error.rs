//! Domain error types.

/// Top-level error type for stockman.
#[derive(Debug, thiserror::Error)]
pub enum StockmanError {
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    #[error("{symbol} is not tracked")]
    NotFound { symbol: String },

    #[error("invalid operation: {reason}")]
    InvalidOperation { reason: String },

    #[error("store unavailable: {reason}")]
    Storage { reason: String },

    #[error("store query error: {reason}")]
    StorageQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("import failed for {file}: {reason}")]
    Import { file: String, reason: String },

    #[error("retrieval failed: {reason}")]
    Retrieval { reason: String },
}

impl From<&StockmanError> for std::process::ExitCode {
    fn from(err: &StockmanError) -> Self {
        let code: u8 = match err {
            StockmanError::ConfigParse { .. }
            | StockmanError::ConfigMissing { .. }
            | StockmanError::ConfigInvalid { .. } => 2,
            StockmanError::Storage { .. } | StockmanError::StorageQuery { .. } => 3,
            StockmanError::Validation { .. }
            | StockmanError::NotFound { .. }
            | StockmanError::InvalidOperation { .. } => 4,
            StockmanError::Import { .. } | StockmanError::Retrieval { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
