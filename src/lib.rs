// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod company;
pub mod config;
pub mod debug;
pub mod dedup;
pub mod export;
pub mod funding;
pub mod geo;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod posting;
pub mod scoring;
pub mod types;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::company::{clean_company_name, is_valid_company_name, CompanyExtractor, ExtractionInput};
pub use crate::config::LeadConfig;
pub use crate::dedup::{dedup_key, dedupe, sort_by_score_desc};
pub use crate::export::{LeadRow, LeadSink, MemorySink};
pub use crate::funding::FundingParser;
pub use crate::geo::GeoMatcher;
pub use crate::ingest::types::{BatchOrigin, JobScan, JobSearch, RawRecord, RecordBatch, SourceProvider};
pub use crate::pipeline::{BatchReport, LeadPipeline};
pub use crate::scoring::{ScoreInput, ScoreWeights, Scorer};
pub use crate::types::{FundingAmount, JobType, Lead, LeadKind, PostingFreshness, SignalCategory, SignalQuery};
pub use crate::validate::{Rejection, Validator};
