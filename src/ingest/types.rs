// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::SignalCategory;

/// Missing or `null` → empty string.
fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Normalized view of one external item (news article, job search hit).
/// Only `title` is required on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    pub title: String,
    #[serde(default, alias = "description", alias = "abstract", deserialize_with = "nullable_string")]
    pub snippet: String,
    #[serde(default, alias = "url", deserialize_with = "nullable_string")]
    pub link: String,
    #[serde(default, alias = "source", deserialize_with = "nullable_string")]
    pub source_name: String,
    #[serde(default, alias = "pubDate", alias = "date", deserialize_with = "nullable_string")]
    pub published_at: String,
    /// Free-text posting date ("3 hours ago", "Posted yesterday").
    #[serde(default, deserialize_with = "nullable_string")]
    pub posting_hint: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Which job scan produced a batch; decides the job lead kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobScan {
    #[default]
    Postings,
    Announcements,
    Fresh,
}

/// Job-search context carried by a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobSearch {
    pub platform: String,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub scan: JobScan,
    /// Optional category whose query pattern is tried first.
    #[serde(default)]
    pub query: Option<SignalCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum BatchOrigin {
    News { query: SignalCategory },
    Jobs(JobSearch),
}

/// Records plus the query / platform that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    pub origin: BatchOrigin,
    #[serde(default)]
    pub records: Vec<RawRecord>,
}

/// Fetch collaborator boundary. The engine only consumes what this returns.
#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_batch(&self) -> Result<RecordBatch>;
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_become_empty() {
        let r: RawRecord =
            serde_json::from_str(r#"{"title":"Acme hiring","description":null,"url":"https://a.in"}"#)
                .unwrap();
        assert_eq!(r.snippet, "");
        assert_eq!(r.link, "https://a.in");
        assert_eq!(r.source_name, "");
        assert!(r.location.is_none());
    }

    #[test]
    fn title_is_required() {
        assert!(serde_json::from_str::<RawRecord>(r#"{"snippet":"x"}"#).is_err());
    }

    #[test]
    fn batch_origin_tagging() {
        let b: RecordBatch = serde_json::from_str(
            r#"{"origin":{"path":"jobs","platform":"Naukri","scan":"fresh"},"records":[]}"#,
        )
        .unwrap();
        match b.origin {
            BatchOrigin::Jobs(js) => {
                assert_eq!(js.platform, "Naukri");
                assert_eq!(js.scan, JobScan::Fresh);
                assert!(js.query.is_none());
            }
            other => panic!("unexpected origin {other:?}"),
        }
    }
}
