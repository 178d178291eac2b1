#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("request for page {page} failed: {message}")]
    Network { page: u32, message: String },
    #[error("page {page} was rate limited")]
    RateLimited { page: u32 },
    #[error("page {page} failed with status {status}: {body}")]
    UnexpectedStatus { page: u32, status: u16, body: String },
    #[error("page {page} returned a malformed payload: {reason}")]
    MalformedPayload { page: u32, reason: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
