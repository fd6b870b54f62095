// src/posting.rs
//! Job-posting enrichments: seniority bucket and posting recency.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::classify_freshness;
use crate::types::{JobType, PostingFreshness};

/// Title rules, first match wins. No match means Mid-Level.
static JOB_TYPE_RULES: Lazy<Vec<(JobType, Regex)>> = Lazy::new(|| {
    [
        (
            JobType::Internship,
            r"(?i)\b(?:intern|internship|trainee|apprentice)\b",
        ),
        (
            JobType::Management,
            r"(?i)\b(?:manager|director|head\s+of|vp|vice\s+president|chief|cto|ceo|cfo)\b",
        ),
        (
            JobType::Senior,
            r"(?i)\b(?:senior|sr\.?|lead|principal|staff|architect)(?:\s|$|\b)",
        ),
        (
            JobType::Junior,
            r"(?i)\b(?:junior|jr\.?|fresher|freshers|entry[\s-]level|graduate|associate)(?:\s|$|\b)",
        ),
    ]
    .into_iter()
    .map(|(t, re)| (t, Regex::new(re).expect("job type regex")))
    .collect()
});

pub fn classify_job_type(title: &str) -> JobType {
    JOB_TYPE_RULES
        .iter()
        .find(|(_, re)| re.is_match(title))
        .map(|(t, _)| *t)
        .unwrap_or(JobType::MidLevel)
}

/// `None` when the record carries no posting-date hint.
pub fn posting_freshness(hint: &str, text: &str, reference_year: Option<i32>) -> Option<PostingFreshness> {
    let hint = hint.trim();
    if hint.is_empty() {
        return None;
    }
    Some(PostingFreshness {
        hint: hint.to_string(),
        is_recent: classify_freshness(hint, text, reference_year).is_recent(),
    })
}
