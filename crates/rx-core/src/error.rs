use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum RxError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("validation failed: {}", crate::validation::format_validation_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to remove record: {0}")]
    FileRemove(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
    #[error("invalid record id: {0}")]
    Uuid(#[from] rx_uuid::UuidError),
    #[error("invalid text: {0}")]
    Text(#[from] rx_types::TextError),
}

pub type RxResult<T> = std::result::Result<T, RxError>;
