//! lead-radar: reads fetched records from disk, prints scored leads as JSON rows.
//!
//! Usage: `lead-radar <input>...` where each input is
//!   `<path>`                            news records, funding query
//!   `<category>:<path>`                 news records for funding|expansion|jobs|linkedin
//!   `jobs@<platform>[@<scan>]:<path>`   job search results (scan: postings|announcements|fresh)
//!
//! `.xml` / `.rss` inputs go through the RSS provider, everything else is JSON.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lead_radar::export::{JsonLinesSink, LeadRow, LeadSink};
use lead_radar::ingest::providers::{JsonFileProvider, NewsRssProvider};
use lead_radar::ingest::types::{BatchOrigin, JobScan, JobSearch, SourceProvider};
use lead_radar::ingest::{collect_batches, AtomicRequestCounter, RequestCounter};
use lead_radar::{LeadConfig, LeadPipeline, SignalCategory};

/// Logs go to stderr; stdout carries only rows. LOG_FORMAT=json switches to JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leads=info,warn"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_category(s: &str) -> Option<SignalCategory> {
    match s.to_ascii_lowercase().as_str() {
        "funding" => Some(SignalCategory::Funding),
        "expansion" => Some(SignalCategory::Expansion),
        "jobs" => Some(SignalCategory::Jobs),
        "linkedin" => Some(SignalCategory::Linkedin),
        _ => None,
    }
}

fn parse_scan(s: &str) -> Result<JobScan> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "postings" => JobScan::Postings,
        "announcements" => JobScan::Announcements,
        "fresh" => JobScan::Fresh,
        other => bail!("unknown job scan mode {other:?}"),
    })
}

fn parse_input(arg: &str) -> Result<(BatchOrigin, String)> {
    let Some((head, path)) = arg.split_once(':') else {
        return Ok((
            BatchOrigin::News {
                query: SignalCategory::Funding,
            },
            arg.to_string(),
        ));
    };

    if let Some(rest) = head.strip_prefix("jobs@") {
        let mut parts = rest.splitn(2, '@');
        let platform = parts.next().unwrap_or_default().trim();
        if platform.is_empty() {
            bail!("missing platform in {arg:?}");
        }
        let scan = parts.next().map(parse_scan).transpose()?.unwrap_or_default();
        return Ok((
            BatchOrigin::Jobs(JobSearch {
                platform: platform.to_string(),
                scan,
                ..Default::default()
            }),
            path.to_string(),
        ));
    }

    match parse_category(head) {
        Some(query) => Ok((BatchOrigin::News { query }, path.to_string())),
        None => bail!("unknown input prefix {head:?} in {arg:?}"),
    }
}

fn provider_for(arg: &str) -> Result<Box<dyn SourceProvider>> {
    let (origin, path) = parse_input(arg)?;
    let is_rss = path.ends_with(".xml") || path.ends_with(".rss");
    let provider: Box<dyn SourceProvider> = match (origin, is_rss) {
        (BatchOrigin::News { query }, true) => Box::new(NewsRssProvider::from_path(query, path)),
        (BatchOrigin::Jobs(_), true) => bail!("RSS input only carries news records: {arg:?}"),
        (origin, false) => Box::new(JsonFileProvider::from_path(origin, path)),
    };
    Ok(provider)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!("usage: lead-radar <[category:]path | jobs@platform[@scan]:path>...");
    }

    let config = LeadConfig::load_default().context("loading lead config")?;
    let pipeline = LeadPipeline::new(config)?;

    let providers = args
        .iter()
        .map(|a| provider_for(a))
        .collect::<Result<Vec<_>>>()?;

    let requests = AtomicRequestCounter::default();
    let (batches, failed) = collect_batches(&providers, Some(&requests)).await;

    let report = tokio::task::spawn_blocking(move || pipeline.run(&batches))
        .await
        .context("pipeline task")?;

    let today = chrono::Local::now().date_naive();
    let rows: Vec<LeadRow> = report
        .leads
        .iter()
        .map(|l| LeadRow::from_lead(l, today))
        .collect();

    let mut sink = JsonLinesSink::new(std::io::stdout().lock());
    let written = sink.append(&rows)?;

    info!(
        target: "leads",
        inputs = args.len(),
        requests = requests.total(),
        failed_inputs = failed,
        written,
        rejected = ?report.rejected,
        "done"
    );
    Ok(())
}
