//! # Triage Client
//!
//! Fetch orchestration for the patient assessment API.
//!
//! - [`FetchConfig`]: endpoint, key and retry policy, resolved once at startup
//! - [`PatientTransport`]: one request for one page; [`HttpTransport`] speaks HTTP via `reqwest`
//! - [`PageFetcher`]: bounded retries with per-family backoff for a single page
//! - [`Collector`]: two-pass walk over every page, tolerating page failures
//!
//! Scoring and classification of the collected records live in `triage-core`.

pub mod backoff;
pub mod collector;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod transport;
pub mod wire;

#[cfg(test)]
mod testing;

pub use backoff::BackoffPolicy;
pub use collector::{Collection, Collector};
pub use config::{max_pages_from_env_value, page_size_from_env_value, FetchConfig};
pub use error::{ClientError, ClientResult};
pub use fetcher::{PageFetcher, PageResult};
pub use transport::{HttpTransport, PatientTransport, TransportResponse};
pub use wire::{parse_page_payload, PagePayload, Pagination};
