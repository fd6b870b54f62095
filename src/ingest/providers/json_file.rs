// src/ingest/providers/json_file.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;

use crate::ingest::types::{BatchOrigin, RawRecord, RecordBatch, SourceProvider};

/// Either a full batch object (its own `origin` wins) or a bare record array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Batch(RecordBatch),
    Records(Vec<RawRecord>),
}

enum Input {
    Inline(String),
    File(PathBuf),
}

/// Reads search results that an upstream fetcher dumped as JSON.
pub struct JsonFileProvider {
    origin: BatchOrigin,
    input: Input,
}

impl JsonFileProvider {
    pub fn from_fixture(origin: BatchOrigin, content: &str) -> Self {
        Self {
            origin,
            input: Input::Inline(content.to_string()),
        }
    }

    /// The file is read on every `fetch_batch`, not here.
    pub fn from_path(origin: BatchOrigin, path: impl Into<PathBuf>) -> Self {
        Self {
            origin,
            input: Input::File(path.into()),
        }
    }

    fn parse(&self, raw: &str) -> Result<RecordBatch> {
        let payload: Payload =
            serde_json::from_str(raw).context("parsing record json (batch object or array)")?;
        Ok(match payload {
            Payload::Batch(b) => b,
            Payload::Records(records) => RecordBatch {
                origin: self.origin.clone(),
                records,
            },
        })
    }
}

#[async_trait]
impl SourceProvider for JsonFileProvider {
    async fn fetch_batch(&self) -> Result<RecordBatch> {
        let batch = match &self.input {
            Input::Inline(s) => self.parse(s)?,
            Input::File(p) => {
                let s = tokio::fs::read_to_string(p)
                    .await
                    .with_context(|| format!("reading records from {}", p.display()))?;
                self.parse(&s)?
            }
        };
        counter!("leads_ingest_records_total", "provider" => self.name())
            .increment(batch.records.len() as u64);
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
