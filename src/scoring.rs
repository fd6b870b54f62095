// src/scoring.rs
//! Additive relevance score for a lead candidate.
//!
//! Rules, in evaluation order (defaults in `ScoreWeights`):
//! 1. base by kind (news 10, jobs/linkedin 20, job posting 25, announcement 30, fresh 40)
//! 2. per distinct hiring keyword (+10 news path, +5 job path)
//! 3. India-hiring keywords (+10 each) and a flat +20 if geo also matched
//! 4. funding kind only: min(lakhs / 5, 50)
//! 5. job path only: freshness and urgency phrasing
//! 6. platform bonus
//! 7. well-known employer
//! 8. self-sourced link (domain contains the company, unless the company is the publisher)
//!
//! The running total is a float and is rounded once at the end.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::company::clean_company_name;
use crate::types::{FundingAmount, LeadKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub base_news: f64,
    pub base_job_category: f64,
    pub base_job_posting: f64,
    pub base_job_announcement: f64,
    pub base_fresh_job_posting: f64,
    pub hiring_keyword_news: f64,
    pub hiring_keyword_job: f64,
    pub india_hiring_keyword: f64,
    pub india_geo_combo: f64,
    pub funding_lakhs_divisor: f64,
    pub funding_cap: f64,
    pub fresh_hours: f64,
    pub fresh_one_day: f64,
    pub fresh_current_year: f64,
    pub immediate: f64,
    pub urgent: f64,
    pub walk_in: f64,
    pub well_known_company: f64,
    pub self_sourced: f64,
    /// Lowercase platform substring → bonus. Highest matching entry wins.
    pub platform_bonus: BTreeMap<String, f64>,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        let platform_bonus = [
            ("linkedin", 10.0),
            ("naukri", 8.0),
            ("instahyre", 6.0),
            ("indeed", 5.0),
            ("glassdoor", 5.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            base_news: 10.0,
            base_job_category: 20.0,
            base_job_posting: 25.0,
            base_job_announcement: 30.0,
            base_fresh_job_posting: 40.0,
            hiring_keyword_news: 10.0,
            hiring_keyword_job: 5.0,
            india_hiring_keyword: 10.0,
            india_geo_combo: 20.0,
            funding_lakhs_divisor: 5.0,
            funding_cap: 50.0,
            fresh_hours: 15.0,
            fresh_one_day: 10.0,
            fresh_current_year: 5.0,
            immediate: 5.0,
            urgent: 5.0,
            walk_in: 8.0,
            well_known_company: 15.0,
            self_sourced: 10.0,
            platform_bonus,
        }
    }
}

/// Recency bucket of a posting date hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// "3 hours ago", "today", "just posted"
    Hours,
    /// "1 day ago", "yesterday"
    OneDay,
    /// only the reference year is mentioned
    CurrentYear,
    Unknown,
}

impl Freshness {
    pub fn is_recent(&self) -> bool {
        matches!(self, Freshness::Hours | Freshness::OneDay)
    }
}

static RE_HOURS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d+\s*(?:hours?|hrs?|minutes?|mins?)\s+ago|today|just\s+(?:now|posted))\b")
        .expect("hours regex")
});
static RE_ONE_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(?:1|one|a)\s*day\s+ago|yesterday)\b").expect("one day regex")
});

/// Classify a posting by recency. A non-empty `hint` is authoritative; `text`
/// is only read when there is no hint. The year rule looks at the hint only.
pub fn classify_freshness(hint: &str, text: &str, reference_year: Option<i32>) -> Freshness {
    let hint = hint.trim();
    let source = if hint.is_empty() { text } else { hint };
    if RE_HOURS.is_match(source) {
        return Freshness::Hours;
    }
    if RE_ONE_DAY.is_match(source) {
        return Freshness::OneDay;
    }
    match reference_year {
        Some(y) if !hint.is_empty() && hint.contains(&y.to_string()) => Freshness::CurrentYear,
        _ => Freshness::Unknown,
    }
}

/// Everything the score depends on. `text` is title + description/snippet.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    pub kind: LeadKind,
    pub text: &'a str,
    pub funding: Option<&'a FundingAmount>,
    pub geo_matched: bool,
    pub platform: Option<&'a str>,
    pub freshness_hint: Option<&'a str>,
    pub company: Option<&'a str>,
    /// News publisher; a company that is only the publisher gets no self-sourced boost.
    pub publisher: Option<&'a str>,
    pub link: &'a str,
    pub reference_year: Option<i32>,
}

impl<'a> ScoreInput<'a> {
    pub fn new(kind: LeadKind, text: &'a str) -> Self {
        Self {
            kind,
            text,
            funding: None,
            geo_matched: false,
            platform: None,
            freshness_hint: None,
            company: None,
            publisher: None,
            link: "",
            reference_year: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: u32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoreWeights,
    hiring: Vec<String>,
    india_hiring: Vec<String>,
    well_known: Vec<String>,
}

impl Scorer {
    pub fn new<S: AsRef<str>>(
        weights: ScoreWeights,
        hiring: &[S],
        india_hiring: &[S],
        well_known: &[S],
    ) -> Self {
        Self {
            weights,
            hiring: distinct_lower(hiring),
            india_hiring: distinct_lower(india_hiring),
            well_known: distinct_lower(well_known),
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn score(&self, input: &ScoreInput<'_>) -> u32 {
        self.score_with_reasons(input).score
    }

    pub fn score_with_reasons(&self, input: &ScoreInput<'_>) -> ScoreCard {
        let w = &self.weights;
        let text = input.text.to_lowercase();
        let mut total = 0.0f64;
        let mut reasons = Vec::new();

        // 1) base
        let base = match input.kind {
            LeadKind::Funding | LeadKind::Expansion => w.base_news,
            LeadKind::Jobs | LeadKind::Linkedin => w.base_job_category,
            LeadKind::JobPosting => w.base_job_posting,
            LeadKind::JobAnnouncement => w.base_job_announcement,
            LeadKind::FreshJobPosting => w.base_fresh_job_posting,
        };
        total += base;
        reasons.push(format!("base:{base}"));

        // 2) hiring keywords
        let hits = count_hits(&text, &self.hiring);
        if hits > 0 {
            let per = if input.kind.is_job_path() {
                w.hiring_keyword_job
            } else {
                w.hiring_keyword_news
            };
            total += hits as f64 * per;
            reasons.push(format!("hiring_keywords:{hits}x{per}"));
        }

        // 3) region-specific hiring
        let india_hits = count_hits(&text, &self.india_hiring);
        let india_bonus = india_hits as f64 * w.india_hiring_keyword;
        if india_bonus > 0.0 {
            total += india_bonus;
            reasons.push(format!("india_hiring:{india_hits}"));
            if input.geo_matched {
                total += w.india_geo_combo;
                reasons.push("india_hiring+geo".into());
            }
        }

        // 4) funding (soft cap)
        if input.kind == LeadKind::Funding && w.funding_lakhs_divisor > 0.0 {
            if let Some(f) = input.funding {
                let boost = (f.lakhs.max(0.0) / w.funding_lakhs_divisor).min(w.funding_cap);
                total += boost;
                reasons.push(format!("funding:{boost:.2}"));
            }
        }

        // 5) freshness + urgency, job path only
        if input.kind.is_job_path() {
            let hint = input.freshness_hint.unwrap_or_default();
            let fresh = classify_freshness(hint, input.text, input.reference_year);
            let boost = match fresh {
                Freshness::Hours => w.fresh_hours,
                Freshness::OneDay => w.fresh_one_day,
                Freshness::CurrentYear => w.fresh_current_year,
                Freshness::Unknown => 0.0,
            };
            if boost > 0.0 {
                total += boost;
                reasons.push(format!("freshness:{fresh:?}"));
            }

            let urgency_text = format!("{text} {}", hint.to_lowercase());
            for (needles, bonus, label) in [
                (&["immediate"][..], w.immediate, "immediate"),
                (&["urgent"][..], w.urgent, "urgent"),
                (&["walk-in", "walk in"][..], w.walk_in, "walk_in"),
            ] {
                if needles.iter().any(|n| urgency_text.contains(n)) {
                    total += bonus;
                    reasons.push(label.to_string());
                }
            }
        }

        // 6) platform
        if let Some(p) = input.platform {
            let p = p.to_lowercase();
            let best = w
                .platform_bonus
                .iter()
                .filter(|(k, _)| !k.is_empty() && p.contains(k.as_str()))
                .map(|(_, v)| *v)
                .fold(0.0f64, f64::max);
            if best > 0.0 {
                total += best;
                reasons.push(format!("platform:{p}"));
            }
        }

        // 7) + 8) company-dependent boosts
        if let Some(company) = input.company {
            let lc = company.to_lowercase();
            if self.well_known.iter().any(|k| lc.contains(k.as_str())) {
                total += w.well_known_company;
                reasons.push("well_known_company".into());
            }
            let is_publisher = input
                .publisher
                .is_some_and(|p| clean_company_name(p).eq_ignore_ascii_case(company));
            if !is_publisher && is_self_sourced(input.link, company) {
                total += w.self_sourced;
                reasons.push("self_sourced".into());
            }
        }

        ScoreCard {
            score: total.max(0.0).round() as u32,
            reasons,
        }
    }
}

/// True if the link's host contains the company name (spaces and punctuation removed).
pub fn is_self_sourced(link: &str, company: &str) -> bool {
    let compact: String = company
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect();
    if compact.chars().count() < 2 {
        return false;
    }
    Url::parse(link.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
        .is_some_and(|host| host.contains(&compact))
}

fn count_hits(text_lower: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|k| text_lower.contains(k.as_str()))
        .count()
}

fn distinct_lower<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let k = it.as_ref().trim().to_lowercase();
        if !k.is_empty() && !out.contains(&k) {
            out.push(k);
        }
    }
    out
}
