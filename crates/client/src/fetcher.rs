//! Fetching a single page with bounded retries.
//!
//! Every attempt either yields a well-formed page or a [`ClientError`] describing why not. Errors
//! never leave this module: they pick the backoff family for the next attempt and, once the
//! attempt budget is spent, collapse into a failed [`PageResult`].

use crate::backoff::BackoffPolicy;
use crate::transport::PatientTransport;
use crate::wire::{parse_page_payload, Pagination};
use crate::{ClientError, ClientResult};
use triage_core::PatientRecord;

/// Outcome of all attempts at one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub page: u32,
    pub data: Vec<PatientRecord>,
    pub success: bool,
    pub pagination: Option<Pagination>,
}

impl PageResult {
    pub fn failed(page: u32) -> Self {
        Self {
            page,
            data: Vec::new(),
            success: false,
            pagination: None,
        }
    }
}

pub struct PageFetcher<T> {
    transport: T,
    backoff: BackoffPolicy,
}

impl<T: PatientTransport> PageFetcher<T> {
    pub fn new(transport: T, backoff: BackoffPolicy) -> Self {
        Self { transport, backoff }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch `page`, making at most `max_retries` attempts.
    ///
    /// Never fails: exhausted attempts produce `PageResult::failed`.
    pub async fn fetch_page(&self, page: u32, limit: u32, max_retries: u32) -> PageResult {
        for attempt in 1..=max_retries {
            let error = match self.attempt(page, limit).await {
                Ok(result) => {
                    tracing::debug!(page, attempt, records = result.data.len(), "page fetched");
                    return result;
                }
                Err(error) => error,
            };

            if attempt == max_retries {
                tracing::warn!(
                    page,
                    attempt,
                    error = %error,
                    "page fetch failed, no attempts left"
                );
                break;
            }

            let delay = self.backoff.delay_for(&error, attempt);
            tracing::warn!(
                page,
                attempt,
                error = %error,
                delay_ms = delay.as_millis() as u64,
                "page fetch failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }

        PageResult::failed(page)
    }

    async fn attempt(&self, page: u32, limit: u32) -> ClientResult<PageResult> {
        let response = self.transport.fetch_page(page, limit).await?;

        if response.is_rate_limited() {
            return Err(ClientError::RateLimited { page });
        }
        if !response.is_success() {
            return Err(ClientError::UnexpectedStatus {
                page,
                status: response.status,
                body: response.body,
            });
        }

        let payload = parse_page_payload(&response.body)
            .map_err(|reason| ClientError::MalformedPayload { page, reason })?;

        Ok(PageResult {
            page,
            data: payload.data,
            success: true,
            pagination: payload.pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedTransport};
    use std::time::Duration;
    use tokio::time::Instant;

    fn fetcher(transport: ScriptedTransport) -> PageFetcher<ScriptedTransport> {
        PageFetcher::new(
            transport,
            BackoffPolicy::new(Duration::from_millis(3_000), Duration::from_millis(2_000)),
        )
    }

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(50),
            "expected {expected:?}, got {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_returns_immediately() {
        let transport = ScriptedTransport::new().script(1, vec![Reply::page(&["A", "B"], 4)]);
        let fetcher = fetcher(transport);
        let start = Instant::now();

        let result = fetcher.fetch_page(1, 5, 3).await;

        assert!(result.success);
        assert_eq!(result.page, 1);
        assert_eq!(result.data.len(), 2);
        assert_eq!(result.pagination.expect("pagination").total_pages, 4);
        assert_elapsed(start, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limits_back_off_exponentially() {
        let transport = ScriptedTransport::new().script(
            2,
            vec![Reply::Status(429), Reply::Status(429), Reply::page(&["C"], 3)],
        );
        let fetcher = fetcher(transport);
        let start = Instant::now();

        let result = fetcher.fetch_page(2, 5, 3).await;

        assert!(result.success);
        // 3s × 2¹ + 3s × 2²
        assert_elapsed(start, Duration::from_millis(18_000));
        assert_eq!(fetcher.transport().calls_for(2), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn status_failures_back_off_linearly() {
        let transport = ScriptedTransport::new().script(
            1,
            vec![Reply::Status(500), Reply::Status(503), Reply::page(&["A"], 1)],
        );
        let fetcher = fetcher(transport);
        let start = Instant::now();

        let result = fetcher.fetch_page(1, 5, 3).await;

        assert!(result.success);
        // 3s × 1 + 3s × 2
        assert_elapsed(start, Duration::from_millis(9_000));
    }

    #[tokio::test(start_paused = true)]
    async fn faults_and_malformed_payloads_use_the_network_step() {
        let transport = ScriptedTransport::new().script(
            1,
            vec![
                Reply::Fault,
                Reply::Body(r#"{"error": "no data"}"#.into()),
                Reply::page(&["A"], 1),
            ],
        );
        let fetcher = fetcher(transport);
        let start = Instant::now();

        let result = fetcher.fetch_page(1, 5, 3).await;

        assert!(result.success);
        // 2s × 1 + 2s × 2
        assert_elapsed(start, Duration::from_millis(6_000));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_return_a_failed_page_without_trailing_wait() {
        let fetcher = fetcher(ScriptedTransport::new().always(4, Reply::Status(502)));
        let start = Instant::now();

        let result = fetcher.fetch_page(4, 5, 3).await;

        assert_eq!(result, PageResult::failed(4));
        assert_eq!(fetcher.transport().calls_for(4), 3);
        assert_elapsed(start, Duration::from_millis(9_000));
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_rate_limiting_is_bounded() {
        let fetcher = fetcher(ScriptedTransport::new().always(1, Reply::Status(429)));

        let result = fetcher.fetch_page(1, 5, 2).await;

        assert!(!result.success);
        assert_eq!(fetcher.transport().calls_for(1), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_makes_no_request() {
        let fetcher = fetcher(ScriptedTransport::new().always(1, Reply::page(&["A"], 1)));

        let result = fetcher.fetch_page(1, 5, 0).await;

        assert!(!result.success);
        assert!(fetcher.transport().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_page_is_still_a_success() {
        let fetcher = fetcher(ScriptedTransport::new().script(1, vec![Reply::page(&[], 1)]));

        let result = fetcher.fetch_page(1, 5, 3).await;

        assert!(result.success);
        assert!(result.data.is_empty());
    }
}
