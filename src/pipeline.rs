// src/pipeline.rs
//! Record → Lead orchestration.
//!
//! Per record: geo → company → funding (news) / job type + freshness (jobs)
//! → score → validate. Records inside a batch are independent and processed
//! in parallel; the only ordering point is the final sort + dedup of a run.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info};

use crate::company::{CompanyExtractor, ExtractionInput};
use crate::config::LeadConfig;
use crate::debug::dev_log_record;
use crate::dedup::sort_and_dedupe;
use crate::funding::FundingParser;
use crate::geo::GeoMatcher;
use crate::ingest::types::{BatchOrigin, JobScan, JobSearch, RawRecord, RecordBatch};
use crate::metrics as m;
use crate::posting::{classify_job_type, posting_freshness};
use crate::scoring::{ScoreInput, Scorer};
use crate::types::{Lead, LeadKind, SignalCategory};
use crate::validate::{Rejection, Validator};

/// Outcome of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Accepted leads, score-descending, deduplicated.
    pub leads: Vec<Lead>,
    pub rejected: BTreeMap<Rejection, usize>,
    pub deduplicated: usize,
    /// Records cut by `max_items_per_platform`.
    pub truncated: usize,
    pub records_seen: usize,
}

impl BatchReport {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

pub fn job_kind(scan: JobScan) -> LeadKind {
    match scan {
        JobScan::Postings => LeadKind::JobPosting,
        JobScan::Announcements => LeadKind::JobAnnouncement,
        JobScan::Fresh => LeadKind::FreshJobPosting,
    }
}

#[derive(Debug)]
pub struct LeadPipeline {
    config: LeadConfig,
    geo: GeoMatcher,
    industries: GeoMatcher,
    funding: FundingParser,
    news_names: CompanyExtractor,
    job_names: CompanyExtractor,
    scorer: Scorer,
    news_gate: Validator,
    job_gate: Validator,
    queries: Vec<(SignalCategory, Regex)>,
    reference_year: Option<i32>,
}

impl LeadPipeline {
    /// Fails only if a configured query pattern does not compile.
    pub fn new(config: LeadConfig) -> Result<Self> {
        let queries = config
            .queries
            .iter()
            .map(|q| {
                Regex::new(&q.pattern)
                    .map(|re| (q.name, re))
                    .with_context(|| format!("compiling query pattern for {}", q.name.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;

        let k = &config.keywords;
        let scorer = Scorer::new(
            config.scoring.clone(),
            &k.hiring,
            &k.india_hiring,
            &k.well_known_companies,
        );

        m::ensure_described();

        Ok(Self {
            geo: GeoMatcher::new(&config.geo.keywords),
            industries: GeoMatcher::new(&k.industry),
            funding: FundingParser::default(),
            news_names: CompanyExtractor::for_news(),
            job_names: CompanyExtractor::for_jobs(),
            scorer,
            news_gate: Validator::news(config.thresholds.news_min_score),
            job_gate: Validator::jobs(config.thresholds.job_min_score),
            queries,
            reference_year: Some(chrono::Utc::now().year()),
            config,
        })
    }

    /// Pin the year used by the "current year" freshness rule.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn config(&self) -> &LeadConfig {
        &self.config
    }

    fn query_regex(&self, category: SignalCategory) -> Option<&Regex> {
        self.queries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, re)| re)
    }

    fn geo_hits(&self, r: &RawRecord) -> Vec<String> {
        let hay = match &r.location {
            Some(loc) => format!("{} {} {}", r.title, r.snippet, loc),
            None => format!("{} {}", r.title, r.snippet),
        };
        self.geo.matches(&hay)
    }

    pub fn process_news(&self, r: &RawRecord, category: SignalCategory) -> Result<Lead, Rejection> {
        let geo = self.geo_hits(r);
        if geo.is_empty() {
            return Err(Rejection::NoGeography);
        }

        let publisher = r.source_name.trim();
        let input = ExtractionInput {
            title: &r.title,
            snippet: &r.snippet,
            link: &r.link,
            query_pattern: self.query_regex(category),
            fallback_source: (!publisher.is_empty()).then_some(publisher),
        };
        let company = self.news_names.extract(&input).ok_or(Rejection::NoCompany)?;

        let text = format!("{} {}", r.title, r.snippet);
        let funding = self.funding.parse(&text);
        if funding.is_some() {
            m::record_funding_parsed();
        }

        let kind = LeadKind::from(category);
        let card = self.scorer.score_with_reasons(&ScoreInput {
            funding: funding.as_ref(),
            geo_matched: true,
            company: Some(company.as_str()),
            publisher: (!publisher.is_empty()).then_some(publisher),
            link: &r.link,
            reference_year: self.reference_year,
            ..ScoreInput::new(kind, &text)
        });

        let lead = Lead {
            company,
            kind,
            score: card.score,
            funding,
            geo: geo.join(", "),
            industries: self.industries.matches(&text),
            source: publisher.to_string(),
            link: r.link.clone(),
            title: r.title.clone(),
            description: r.snippet.clone(),
            published_at: r.published_at.clone(),
            platform: None,
            job_type: None,
            posting_freshness: None,
        };
        self.news_gate.validate(&lead)?;
        dev_log_record("news_accepted", &lead.title, &geo, &card.reasons, lead.score);
        Ok(lead)
    }

    pub fn process_job(&self, r: &RawRecord, search: &JobSearch) -> Result<Lead, Rejection> {
        let geo = self.geo_hits(r);
        if geo.is_empty() {
            return Err(Rejection::NoGeography);
        }

        let input = ExtractionInput {
            title: &r.title,
            snippet: &r.snippet,
            link: &r.link,
            query_pattern: search.query.and_then(|q| self.query_regex(q)),
            fallback_source: None,
        };
        let company = self.job_names.extract(&input).ok_or(Rejection::NoCompany)?;

        let platform = r
            .platform
            .clone()
            .unwrap_or_else(|| search.platform.trim().to_string());
        let text = format!("{} {}", r.title, r.snippet);
        let kind = job_kind(search.scan);

        let card = self.scorer.score_with_reasons(&ScoreInput {
            geo_matched: true,
            platform: (!platform.is_empty()).then_some(platform.as_str()),
            freshness_hint: Some(r.posting_hint.as_str()),
            company: Some(company.as_str()),
            link: &r.link,
            reference_year: self.reference_year,
            ..ScoreInput::new(kind, &text)
        });

        let source = match r.source_name.trim() {
            "" => platform.clone(),
            s => s.to_string(),
        };
        let lead = Lead {
            company,
            kind,
            score: card.score,
            funding: None,
            geo: geo.join(", "),
            industries: self.industries.matches(&text),
            source,
            link: r.link.clone(),
            title: r.title.clone(),
            description: r.snippet.clone(),
            published_at: r.published_at.clone(),
            platform: (!platform.is_empty()).then_some(platform),
            job_type: Some(classify_job_type(&r.title)),
            posting_freshness: posting_freshness(&r.posting_hint, &text, self.reference_year),
        };
        self.job_gate.validate(&lead)?;
        dev_log_record("job_accepted", &lead.title, &geo, &card.reasons, lead.score);
        Ok(lead)
    }

    /// Unsorted per-batch pass; accepted leads come back in record order.
    fn process_batch(&self, batch: &RecordBatch, report: &mut BatchReport) -> Vec<Lead> {
        let cap = self.config.limits.max_items_per_platform;
        let records = &batch.records[..batch.records.len().min(cap)];
        report.records_seen += batch.records.len();
        report.truncated += batch.records.len() - records.len();
        m::record_seen(batch.records.len());

        let outcomes: Vec<Result<Lead, Rejection>> = records
            .par_iter()
            .map(|r| match &batch.origin {
                BatchOrigin::News { query } => self.process_news(r, *query),
                BatchOrigin::Jobs(search) => self.process_job(r, search),
            })
            .collect();

        let mut leads = Vec::with_capacity(outcomes.len());
        for (r, outcome) in records.iter().zip(outcomes) {
            match outcome {
                Ok(lead) => {
                    m::record_accepted(lead.kind.as_str());
                    leads.push(lead);
                }
                Err(reason) => {
                    debug!(target: "leads", %reason, title_id = %crate::debug::record_id(&r.title), "record rejected");
                    m::record_rejected(reason);
                    *report.rejected.entry(reason).or_default() += 1;
                }
            }
        }
        leads
    }

    pub fn run_batch(&self, batch: &RecordBatch) -> BatchReport {
        self.run(std::slice::from_ref(batch))
    }

    /// Merge every batch, then stable score-descending sort and dedup.
    pub fn run(&self, batches: &[RecordBatch]) -> BatchReport {
        let t0 = Instant::now();
        let mut report = BatchReport::default();

        let mut merged = Vec::new();
        for b in batches {
            merged.extend(self.process_batch(b, &mut report));
        }

        let (leads, removed) = sort_and_dedupe(merged);
        m::record_dedup(removed);
        report.leads = leads;
        report.deduplicated = removed;

        m::record_batch_ms(t0.elapsed().as_secs_f64() * 1_000.0);
        info!(
            target: "leads",
            batches = batches.len(),
            seen = report.records_seen,
            accepted = report.leads.len(),
            rejected = report.rejected_total(),
            deduplicated = report.deduplicated,
            truncated = report.truncated,
            "run complete"
        );
        report
    }
}
