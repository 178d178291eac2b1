#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to read patient records: {0}")]
    FileRead(std::io::Error),
    #[error("failed to deserialize patient records: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize {what}: {source}")]
    Serialization {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
