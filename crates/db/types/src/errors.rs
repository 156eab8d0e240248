use thiserror::Error;
use typed_sled::error::Error;

#[derive(Debug, Error, Clone)]
pub enum DbError {
    /// A database worker task failed in an way that could not be determined.
    #[error("worker task exited strangely")]
    WorkerFailedStrangely,

    #[error("codec error {0}")]
    CodecError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    /// The store was written by an incompatible version and could not be reset.
    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for DbError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<Error> for DbError {
    fn from(value: Error) -> Self {
        Self::Other(format!("sled error: {value:?}"))
    }
}

impl From<sled::Error> for DbError {
    fn from(value: sled::Error) -> Self {
        match value {
            sled::Error::Io(e) => Self::IoError(e.to_string()),
            other => Self::Other(format!("sled error: {other}")),
        }
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::IoError(value.to_string())
    }
}
