use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocmetaError>;

#[derive(Error, Debug)]
pub enum LocmetaError {
    #[error("Failed to load data from {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },
    #[error("No commits loaded")]
    EmptyDataset,
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl LocmetaError {
    pub fn data_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        LocmetaError::DataLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
