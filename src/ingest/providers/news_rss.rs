// src/ingest/providers/news_rss.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime, UtcOffset,
};

use crate::ingest::types::{BatchOrigin, RawRecord, RecordBatch, SourceProvider};
use crate::types::SignalCategory;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<ItemSource>,
}

/// `<source url="https://inc42.com">Inc42</source>`
#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "$text")]
    name: Option<String>,
}

/// RFC 2822 → RFC 3339 (UTC). Unparseable dates pass through as given.
fn rfc2822_to_rfc3339(ts: &str) -> String {
    OffsetDateTime::parse(ts.trim(), &Rfc2822)
        .ok()
        .and_then(|dt| dt.to_offset(UtcOffset::UTC).format(&Rfc3339).ok())
        .unwrap_or_else(|| ts.trim().to_string())
}

/// Aggregator feeds append the publisher: "Acme raises ₹5 crore - Inc42".
fn strip_publisher_suffix(title: &str, publisher: &str) -> String {
    let publisher = publisher.trim();
    if publisher.is_empty() {
        return title.trim().to_string();
    }
    title
        .trim()
        .strip_suffix(publisher)
        .and_then(|t| t.trim_end().strip_suffix(['-', '|', '\u{2013}']))
        .map(|t| t.trim_end().to_string())
        .unwrap_or_else(|| title.trim().to_string())
}

/// News search results delivered as an RSS document (fixture or file).
pub struct NewsRssProvider {
    query: SignalCategory,
    rss_content: Option<String>,
    path: Option<PathBuf>,
}

impl NewsRssProvider {
    pub fn from_fixture(query: SignalCategory, content: &str) -> Self {
        Self {
            query,
            rss_content: Some(content.to_string()),
            path: None,
        }
    }

    pub fn from_path(query: SignalCategory, path: impl Into<PathBuf>) -> Self {
        Self {
            query,
            rss_content: None,
            path: Some(path.into()),
        }
    }

    fn parse(&self, xml: &str) -> Result<RecordBatch> {
        let rss: Rss = from_str(xml).context("parsing news rss xml")?;
        let channel_name = rss.channel.title.unwrap_or_default();
        let mut records = Vec::with_capacity(rss.channel.item.len());

        for it in rss.channel.item {
            let publisher = it
                .source
                .and_then(|s| s.name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            let title = it.title.unwrap_or_default();
            let title = match &publisher {
                Some(p) => strip_publisher_suffix(&title, p),
                None => title.trim().to_string(),
            };
            if title.is_empty() {
                continue;
            }
            records.push(RawRecord {
                title,
                snippet: it.description.unwrap_or_default(),
                link: it.link.unwrap_or_default(),
                source_name: publisher.unwrap_or_else(|| channel_name.trim().to_string()),
                published_at: it
                    .pub_date
                    .as_deref()
                    .map(rfc2822_to_rfc3339)
                    .unwrap_or_default(),
                ..Default::default()
            });
        }

        Ok(RecordBatch {
            origin: BatchOrigin::News { query: self.query },
            records,
        })
    }
}

#[async_trait]
impl SourceProvider for NewsRssProvider {
    async fn fetch_batch(&self) -> Result<RecordBatch> {
        let t0 = std::time::Instant::now();

        let batch = match (&self.rss_content, &self.path) {
            (Some(xml), _) => self.parse(xml)?,
            (None, Some(p)) => {
                let xml = tokio::fs::read_to_string(p)
                    .await
                    .with_context(|| format!("reading rss from {}", p.display()))?;
                self.parse(&xml)?
            }
            (None, None) => anyhow::bail!("news rss provider has no input"),
        };

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("leads_parse_ms").record(ms);
        counter!("leads_ingest_records_total", "provider" => self.name())
            .increment(batch.records.len() as u64);

        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "news_rss"
    }
}
