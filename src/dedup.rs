// src/dedup.rs
//! Within-run deduplication of leads.
//!
//! Key: `normalized company | source`, plus `| first 50 chars of title` for
//! job-path leads (one employer posts many distinct roles on the same board).
//! The first lead per key survives, so callers sort by score (descending)
//! before deduplicating to keep the best instance.

use std::collections::HashSet;

use crate::types::Lead;

const TITLE_PREFIX_CHARS: usize = 50;

/// Lowercase, alphanumerics only, single spaces.
pub fn normalize_company(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn dedup_key(lead: &Lead) -> String {
    let mut key = format!(
        "{}|{}",
        normalize_company(&lead.company),
        lead.source.trim().to_lowercase()
    );
    if lead.kind.is_job_path() {
        let prefix: String = lead
            .title
            .trim()
            .to_lowercase()
            .chars()
            .take(TITLE_PREFIX_CHARS)
            .collect();
        key.push('|');
        key.push_str(&prefix);
    }
    key
}

/// Stable sort, highest score first; equal scores keep their input order.
pub fn sort_by_score_desc(leads: &mut [Lead]) {
    leads.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Keep the first lead per key. Never reorders.
pub fn dedupe(leads: Vec<Lead>) -> Vec<Lead> {
    let mut seen: HashSet<String> = HashSet::with_capacity(leads.len());
    leads
        .into_iter()
        .filter(|l| seen.insert(dedup_key(l)))
        .collect()
}

/// Sort + dedupe in one call. Returns (kept, removed count).
pub fn sort_and_dedupe(mut leads: Vec<Lead>) -> (Vec<Lead>, usize) {
    sort_by_score_desc(&mut leads);
    let before = leads.len();
    let kept = dedupe(leads);
    let removed = before - kept.len();
    (kept, removed)
}
