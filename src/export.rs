// src/export.rs
//! Flat rows for the external lead store, and the store boundary itself.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Lead;

pub const HEADERS: [&str; 13] = [
    "Date",
    "Company",
    "Signal Type",
    "Score",
    "Funding (raw)",
    "Funding (lakhs)",
    "Geography",
    "Source",
    "URL",
    "Title",
    "Description",
    "Platform/JobType",
    "Posting Date",
];

const NOT_APPLICABLE: &str = "N/A";
const MAX_DESCRIPTION_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRow {
    pub date: String,
    pub company: String,
    pub signal_type: String,
    pub score: u32,
    pub funding_raw: String,
    pub funding_lakhs: String,
    pub geography: String,
    pub source: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub platform_job_type: String,
    pub posting_date: String,
}

impl LeadRow {
    pub fn from_lead(lead: &Lead, run_date: NaiveDate) -> Self {
        let (funding_raw, funding_lakhs) = match &lead.funding {
            Some(f) => (f.raw_text.clone(), f.lakhs.to_string()),
            None => (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string()),
        };
        let platform_job_type = match (&lead.platform, lead.job_type) {
            (Some(p), Some(t)) => format!("{p} / {}", t.as_str()),
            (Some(p), None) => p.clone(),
            (None, Some(t)) => t.as_str().to_string(),
            (None, None) => String::new(),
        };
        let posting_date = lead
            .posting_freshness
            .as_ref()
            .map(|f| f.hint.clone())
            .unwrap_or_else(|| lead.published_at.clone());

        Self {
            date: run_date.format("%Y-%m-%d").to_string(),
            company: lead.company.clone(),
            signal_type: lead.kind.as_str().to_string(),
            score: lead.score,
            funding_raw,
            funding_lakhs,
            geography: lead.geo.clone(),
            source: lead.source.clone(),
            url: lead.link.clone(),
            title: lead.title.clone(),
            description: lead.description.chars().take(MAX_DESCRIPTION_CHARS).collect(),
            platform_job_type,
            posting_date,
        }
    }

    /// Cells in `HEADERS` order.
    pub fn to_cells(&self) -> [String; 13] {
        [
            self.date.clone(),
            self.company.clone(),
            self.signal_type.clone(),
            self.score.to_string(),
            self.funding_raw.clone(),
            self.funding_lakhs.clone(),
            self.geography.clone(),
            self.source.clone(),
            self.url.clone(),
            self.title.clone(),
            self.description.clone(),
            self.platform_job_type.clone(),
            self.posting_date.clone(),
        ]
    }
}

/// External lead store. Returns how many rows were actually written.
pub trait LeadSink {
    fn append(&mut self, rows: &[LeadRow]) -> Result<usize>;
}

/// In-memory store that skips URLs it already holds. Rows without a URL are
/// always kept.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Vec<LeadRow>,
    urls: HashSet<String>,
}

impl MemorySink {
    pub fn rows(&self) -> &[LeadRow] {
        &self.rows
    }
}

impl LeadSink for MemorySink {
    fn append(&mut self, rows: &[LeadRow]) -> Result<usize> {
        let mut written = 0;
        for row in rows {
            let url = row.url.trim();
            if !url.is_empty() && !self.urls.insert(url.to_string()) {
                continue;
            }
            self.rows.push(row.clone());
            written += 1;
        }
        Ok(written)
    }
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LeadSink for JsonLinesSink<W> {
    fn append(&mut self, rows: &[LeadRow]) -> Result<usize> {
        for row in rows {
            serde_json::to_writer(&mut self.out, row).context("serializing lead row")?;
            self.out.write_all(b"\n").context("writing lead row")?;
        }
        self.out.flush().context("flushing lead rows")?;
        Ok(rows.len())
    }
}
