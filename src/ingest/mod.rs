// src/ingest/mod.rs
//! Boundary to the fetch collaborator: record normalization, provider
//! collection and the request counter the fetch side owns.
//!
//! Nothing in here is read by extraction or scoring; the pipeline only sees
//! the `RecordBatch`es collected here.

pub mod providers;
pub mod types;

use crate::ingest::types::{RawRecord, RecordBatch, SourceProvider};
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Max chars kept from any one text field.
const MAX_FIELD_CHARS: usize = 1500;

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));

/// Decode entities, strip tags, ASCII-fy typographic quotes, collapse
/// whitespace, cap length.
pub fn normalize_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, " ");
    let quoted = stripped
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    let out = RE_WS.replace_all(&quoted, " ");
    let out = out.trim();

    if out.chars().count() > MAX_FIELD_CHARS {
        out.chars().take(MAX_FIELD_CHARS).collect()
    } else {
        out.to_string()
    }
}

/// Normalize the free-text fields of a record in place.
pub fn normalize_record(r: &mut RawRecord) {
    r.title = normalize_text(&r.title);
    r.snippet = normalize_text(&r.snippet);
    r.link = r.link.trim().to_string();
    r.source_name = normalize_text(&r.source_name);
    r.published_at = r.published_at.trim().to_string();
    r.posting_hint = normalize_text(&r.posting_hint);
    r.location = r
        .location
        .take()
        .map(|l| normalize_text(&l))
        .filter(|l| !l.is_empty());
    r.platform = r
        .platform
        .take()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
}

/// Request accounting owned by the fetch side (quota dashboards, backoff).
/// The extraction/scoring engine never reads it.
pub trait RequestCounter: Send + Sync {
    fn record(&self, provider: &str);
    fn total(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct AtomicRequestCounter {
    total: AtomicU64,
}

impl RequestCounter for AtomicRequestCounter {
    fn record(&self, provider: &str) {
        self.total.fetch_add(1, Ordering::Relaxed);
        counter!("leads_provider_requests_total", "provider" => provider.to_string()).increment(1);
    }

    fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

/// Fetch every provider once. Provider failures are logged and counted, never
/// fatal. Records left without a title after normalization are dropped.
/// Returns (batches, failed provider count).
pub async fn collect_batches(
    providers: &[Box<dyn SourceProvider>],
    requests: Option<&dyn RequestCounter>,
) -> (Vec<RecordBatch>, usize) {
    crate::metrics::ensure_described();

    let mut batches = Vec::with_capacity(providers.len());
    let mut failed = 0usize;

    for p in providers {
        if let Some(c) = requests {
            c.record(p.name());
        }
        match p.fetch_batch().await {
            Ok(mut batch) => {
                for r in batch.records.iter_mut() {
                    normalize_record(r);
                }
                batch.records.retain(|r| !r.title.is_empty());
                tracing::debug!(
                    target: "leads",
                    provider = p.name(),
                    records = batch.records.len(),
                    "batch collected"
                );
                batches.push(batch);
            }
            Err(e) => {
                tracing::warn!(target: "leads", error = ?e, provider = p.name(), "provider error");
                counter!(crate::metrics::PROVIDER_ERRORS_TOTAL).increment(1);
                failed += 1;
            }
        }
    }

    (batches, failed)
}
