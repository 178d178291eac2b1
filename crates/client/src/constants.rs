//! Defaults for talking to the patient assessment API.
//!
//! Every value here can be overridden through [`crate::FetchConfig`].

use std::time::Duration;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Collection endpoint used when no base URL is configured.
pub const DEFAULT_API_BASE: &str = "https://assessment.ksensetech.com/api/patients";

/// Records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Attempts per page during the first pass.
pub const FIRST_PASS_MAX_RETRIES: u32 = 3;

/// Attempts per page when revisiting failed pages.
pub const RETRY_PASS_MAX_RETRIES: u32 = 2;

/// Base of the rate-limit (exponential) and status-failure (linear) backoff.
pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(3_000);

/// Step of the network-fault and malformed-payload backoff.
pub const NETWORK_FAULT_BACKOFF: Duration = Duration::from_millis(2_000);

/// Pause after each successful first-pass page.
pub const INTER_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Pause between pages revisited in the retry pass.
pub const RETRY_PASS_DELAY: Duration = Duration::from_millis(1_000);

/// Upper bound on first-pass pages, independent of what pagination reports.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Connect timeout for the HTTP client; exceeding it counts as a network fault.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
