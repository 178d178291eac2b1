//! Request/response seam between the fetch logic and HTTP.
//!
//! [`PatientTransport`] is the black-box primitive: one request for one page, returning the raw
//! status and body. Only faults that produce no response at all (connection refused, timeouts,
//! a body that cannot be read) are errors here; status handling lives in the fetcher.

use crate::config::FetchConfig;
use crate::constants::API_KEY_HEADER;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;

/// Raw response for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait PatientTransport: Send + Sync {
    /// Request one page of patient records.
    async fn fetch_page(&self, page: u32, limit: u32) -> ClientResult<TransportResponse>;
}

#[async_trait]
impl<T: PatientTransport + ?Sized> PatientTransport for Box<T> {
    async fn fetch_page(&self, page: u32, limit: u32) -> ClientResult<TransportResponse> {
        (**self).fetch_page(page, limit).await
    }
}

/// `reqwest` transport for the assessment API.
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &FetchConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self {
            base_url: config.base_url().to_owned(),
            api_key: config.api_key().to_owned(),
            client,
        })
    }

    fn network_error(page: u32, error: reqwest::Error) -> ClientError {
        let message = if error.is_connect() {
            format!("could not connect: {error}")
        } else if error.is_timeout() {
            format!("timed out: {error}")
        } else {
            error.to_string()
        };
        ClientError::Network { page, message }
    }
}

#[async_trait]
impl PatientTransport for HttpTransport {
    async fn fetch_page(&self, page: u32, limit: u32) -> ClientResult<TransportResponse> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page), ("limit", limit)])
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| Self::network_error(page, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::network_error(page, e))?;

        Ok(TransportResponse { status, body })
    }
}
