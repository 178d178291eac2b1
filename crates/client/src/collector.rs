//! Two-pass collection of the full patient set.
//!
//! The first pass walks pages from 1 until the page number passes the last total-page count the
//! service reported (or the configured page cap). Pages that fail or come back empty are noted and
//! revisited once in a second pass with a smaller attempt budget. Requests are strictly
//! sequential, one in flight at a time.
//!
//! Records are kept in fetch order: first-pass pages, then recovered pages. Nothing is re-sorted
//! or deduplicated.

use crate::backoff::BackoffPolicy;
use crate::config::FetchConfig;
use crate::fetcher::{PageFetcher, PageResult};
use crate::transport::{HttpTransport, PatientTransport};
use crate::wire::Pagination;
use crate::ClientResult;
use triage_core::PatientRecord;

/// Everything gathered by one collection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub patients: Vec<PatientRecord>,
    /// Pages that failed the first pass but were fetched in the retry pass.
    pub recovered_pages: Vec<u32>,
    /// Pages that failed both passes; their records are absent.
    pub failed_pages: Vec<u32>,
    /// Last total-page count reported by the service.
    pub total_pages: Option<u32>,
    /// Last total-record count reported by the service.
    pub total_records: Option<u64>,
}

impl Collection {
    /// True when no page is missing and the record count matches what the service reported.
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
            && self
                .total_records
                .is_none_or(|total| self.patients.len() as u64 >= total)
    }

    fn note_pagination(&mut self, pagination: Option<Pagination>) {
        if let Some(pagination) = pagination {
            self.total_pages = Some(pagination.total_pages);
            self.total_records = Some(pagination.total);
        }
    }
}

pub struct Collector<T> {
    fetcher: PageFetcher<T>,
    config: FetchConfig,
}

impl Collector<HttpTransport> {
    /// Collector talking HTTP to the configured endpoint.
    pub fn from_config(config: FetchConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: PatientTransport> Collector<T> {
    pub fn new(transport: T, config: FetchConfig) -> Self {
        let backoff = BackoffPolicy::from(&config);
        Self {
            fetcher: PageFetcher::new(transport, backoff),
            config,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        self.fetcher.transport()
    }

    /// Fetch every page, tolerating page failures.
    ///
    /// Page failures are recorded in the returned [`Collection`], never raised.
    pub async fn collect(&self) -> Collection {
        let mut collection = Collection::default();

        let failed = self.first_pass(&mut collection).await;
        self.retry_pass(&mut collection, failed).await;

        tracing::info!(
            fetched = collection.patients.len(),
            expected = ?collection.total_records,
            recovered_pages = ?collection.recovered_pages,
            failed_pages = ?collection.failed_pages,
            "collection finished: fetched {}/{} patients",
            collection.patients.len(),
            collection
                .total_records
                .map_or_else(|| "?".to_string(), |t| t.to_string()),
        );

        collection
    }

    /// Returns the pages that failed or came back empty.
    async fn first_pass(&self, collection: &mut Collection) -> Vec<u32> {
        let limit = self.config.page_size();
        let max_retries = self.config.first_pass_retries();
        let max_pages = self.config.max_pages();

        let mut failed = Vec::new();
        let mut known_total_pages: u32 = 0;
        let mut page: u32 = 1;

        loop {
            tracing::info!(page, "fetching page");
            let result = self.fetcher.fetch_page(page, limit, max_retries).await;
            let fetched = result.success && !result.data.is_empty();

            if fetched {
                if let Some(pagination) = result.pagination {
                    known_total_pages = pagination.total_pages;
                }
                collection.note_pagination(result.pagination);
                tracing::info!(
                    page,
                    records = result.data.len(),
                    total_pages = known_total_pages,
                    "page collected"
                );
                collection.patients.extend(result.data);
            } else {
                tracing::warn!(page, "page failed, queued for retry pass");
                failed.push(page);
            }

            page += 1;
            if page > known_total_pages {
                break;
            }
            if page > max_pages {
                tracing::warn!(
                    max_pages,
                    known_total_pages,
                    "page cap reached before the reported last page"
                );
                break;
            }

            if fetched {
                tokio::time::sleep(self.config.inter_page_delay()).await;
            }
        }

        failed
    }

    async fn retry_pass(&self, collection: &mut Collection, failed: Vec<u32>) {
        if failed.is_empty() {
            return;
        }

        tracing::info!(pages = ?failed, "retrying failed pages");
        let limit = self.config.page_size();
        let max_retries = self.config.retry_pass_retries();

        for (i, page) in failed.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.retry_pass_delay()).await;
            }

            let PageResult {
                data,
                success,
                pagination,
                ..
            } = self.fetcher.fetch_page(page, limit, max_retries).await;

            if success {
                tracing::info!(page, records = data.len(), "page recovered");
                collection.note_pagination(pagination);
                collection.patients.extend(data);
                collection.recovered_pages.push(page);
            } else {
                tracing::warn!(page, "page failed in both passes, records skipped");
                collection.failed_pages.push(page);
            }
        }
    }
}
