use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_client::constants::DEFAULT_API_BASE;
use triage_client::{max_pages_from_env_value, page_size_from_env_value, Collector, FetchConfig};
use triage_core::{assess, parse_blood_pressure, read_records, scoring, Assessment};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Patient risk triage over the assessment API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every patient page and print the alert summary
    Fetch {
        /// Collection endpoint (defaults to TRIAGE_API_BASE, then the public API)
        #[arg(long)]
        base_url: Option<String>,
        /// API key (defaults to TRIAGE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Records per page (defaults to TRIAGE_PAGE_SIZE, then 5)
        #[arg(long)]
        limit: Option<u32>,
        /// Upper bound on pages walked in the first pass
        #[arg(long)]
        max_pages: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Score patient records saved as a JSON array
    Score {
        /// Path to the saved records
        records: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse and score a single blood-pressure value
    Bp {
        /// Value such as 120/80
        value: String,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Write JSON to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Print every scored patient instead of the summary
    #[arg(long)]
    scored: bool,
}

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

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Fetch {
            base_url,
            api_key,
            limit,
            max_pages,
            output,
        }) => {
            let config = resolve_fetch_config(
                base_url.or_else(|| std::env::var("TRIAGE_API_BASE").ok()),
                api_key.or_else(|| std::env::var("TRIAGE_API_KEY").ok()),
                limit.map(|n| n.to_string()).or_else(|| std::env::var("TRIAGE_PAGE_SIZE").ok()),
                max_pages
                    .map(|n| n.to_string())
                    .or_else(|| std::env::var("TRIAGE_MAX_PAGES").ok()),
            )?;

            let collector = Collector::from_config(config)?;
            let collection = collector.collect().await;
            if !collection.failed_pages.is_empty() {
                tracing::warn!(
                    pages = ?collection.failed_pages,
                    "some pages could not be fetched; results are partial"
                );
            }

            let assessment = assess(&collection.patients);
            emit(&assessment, &output)?;
        }
        Some(Commands::Score { records, output }) => {
            let records = read_records(&records)
                .with_context(|| format!("reading {}", records.display()))?;
            let assessment = assess(&records);
            emit(&assessment, &output)?;
        }
        Some(Commands::Bp { value }) => match parse_blood_pressure(&value) {
            Some(bp) => println!(
                "systolic: {}, diastolic: {}, score: {}",
                bp.systolic,
                bp.diastolic,
                scoring::bp_score_for(bp)
            ),
            None => println!("unparsable blood pressure {value:?}, score: 0"),
        },
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

fn resolve_fetch_config(
    base_url: Option<String>,
    api_key: Option<String>,
    page_size: Option<String>,
    max_pages: Option<String>,
) -> anyhow::Result<FetchConfig> {
    let base_url = base_url.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    let api_key = api_key.context("an API key is required (--api-key or TRIAGE_API_KEY)")?;

    let config = FetchConfig::new(base_url, api_key)?
        .with_page_size(page_size_from_env_value(page_size)?)?
        .with_max_pages(max_pages_from_env_value(max_pages)?)?;
    Ok(config)
}

fn render(assessment: &Assessment, scored: bool) -> anyhow::Result<String> {
    let json = if scored {
        assessment.patients_json()?
    } else {
        assessment.summary_json()?
    };
    Ok(json)
}

fn emit(assessment: &Assessment, args: &OutputArgs) -> anyhow::Result<()> {
    let json = render(assessment, args.scored)?;
    match &args.output {
        Some(path) => write_output(path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "results written");
    Ok(())
}
