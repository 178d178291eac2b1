use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_client::constants::DEFAULT_API_BASE;
use triage_client::{Collector, FetchConfig, max_pages_from_env_value, page_size_from_env_value};
use triage_core::assess;

/// One-shot triage run against the assessment API
///
/// Collects every patient page, scores each record and prints the alert summary as JSON on
/// stdout. Logs go to stderr.
///
/// # Environment Variables
/// - `TRIAGE_API_KEY`: API key sent as `x-api-key` (required)
/// - `TRIAGE_API_BASE`: collection endpoint (default: the public assessment API)
/// - `TRIAGE_PAGE_SIZE`: records per page (default: 5)
/// - `TRIAGE_MAX_PAGES`: first-pass page cap (default: 100)
///
/// # Returns
/// * `Ok(())` - If the run completes, even with some pages missing
/// * `Err(anyhow::Error)` - If configuration is invalid or the HTTP client cannot be built
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_client=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url =
        std::env::var("TRIAGE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
    let api_key = std::env::var("TRIAGE_API_KEY").context("TRIAGE_API_KEY must be set")?;

    let config = FetchConfig::new(&base_url, api_key)?
        .with_page_size(page_size_from_env_value(
            std::env::var("TRIAGE_PAGE_SIZE").ok(),
        )?)?
        .with_max_pages(max_pages_from_env_value(
            std::env::var("TRIAGE_MAX_PAGES").ok(),
        )?)?;

    tracing::info!("++ Starting triage run against {}", base_url);

    let collector = Collector::from_config(config)?;
    let collection = collector.collect().await;
    if !collection.is_complete() {
        tracing::warn!(
            failed_pages = ?collection.failed_pages,
            "collection is incomplete; summary covers fetched patients only"
        );
    }

    let assessment = assess(&collection.patients);
    println!("{}", assessment.summary_json()?);

    Ok(())
}
