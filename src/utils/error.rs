use std::fmt;
use thiserror::Error;

/// 查找失敗時所屬的實體類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Buyer,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Buyer => write!(f, "buyer"),
            EntityKind::Product => write!(f, "product"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input file not found: {path}")]
    MissingFileError { path: String },

    #[error("Malformed record in {source_name} at {position}: {reason}")]
    MalformedRecordError {
        source_name: String,
        position: usize,
        reason: String,
    },

    #[error("Invalid price '{value}' for product {product_id}")]
    InvalidPriceError { product_id: String, value: String },

    #[error("Unknown {kind} id: {id}")]
    UnknownIdentifierError { kind: EntityKind, id: String },

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Lookup,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::IoError(_) | EtlError::MissingFileError { .. } => ErrorCategory::Io,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::MalformedRecordError { .. }
            | EtlError::InvalidPriceError { .. } => ErrorCategory::Input,
            EtlError::UnknownIdentifierError { .. } => ErrorCategory::Lookup,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 設定錯誤可以直接修正後重跑
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Lookup => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MissingFileError { path } => {
                format!("Check that '{}' exists under the data directory", path)
            }
            EtlError::IoError(_) => "Check file permissions and available disk space".to_string(),
            EtlError::SerializationError(_) => {
                "Make sure the buyers file is valid JSON with a top-level \"buyers\" array"
                    .to_string()
            }
            EtlError::CsvError(_) => "Check the export path and format".to_string(),
            EtlError::MalformedRecordError { source_name, .. } => {
                format!("Fix the reported entry in {} and run again", source_name)
            }
            EtlError::InvalidPriceError { product_id, .. } => {
                format!("Product {} needs an integer price", product_id)
            }
            EtlError::UnknownIdentifierError { kind, id } => {
                format!("Add {} '{}' to the {} source or remove it from the transactions", kind, id, kind)
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access an input or output file: {}", self),
            ErrorCategory::Input => format!("Input data could not be parsed: {}", self),
            ErrorCategory::Lookup => format!("Transaction references missing data: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
        }
    }

    /// 依嚴重程度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
