// src/types.rs
//! Core data model: signal queries, funding amounts and the emitted `Lead`.

use serde::{Deserialize, Serialize};

/// Search category a news batch was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Funding,
    Expansion,
    Jobs,
    Linkedin,
}

impl SignalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Funding => "funding",
            SignalCategory::Expansion => "expansion",
            SignalCategory::Jobs => "jobs",
            SignalCategory::Linkedin => "linkedin",
        }
    }
}

/// Static descriptor of a search category. `pattern` is a regex with one
/// capture group holding the company name, tried first against the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalQuery {
    pub name: SignalCategory,
    pub pattern: String,
}

/// Why a lead was surfaced. News categories plus the job-search variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    Funding,
    Expansion,
    Jobs,
    Linkedin,
    JobPosting,
    JobAnnouncement,
    FreshJobPosting,
}

impl LeadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadKind::Funding => "funding",
            LeadKind::Expansion => "expansion",
            LeadKind::Jobs => "jobs",
            LeadKind::Linkedin => "linkedin",
            LeadKind::JobPosting => "job_posting",
            LeadKind::JobAnnouncement => "job_announcement",
            LeadKind::FreshJobPosting => "fresh_job_posting",
        }
    }

    /// True for leads built on the job-search path.
    pub fn is_job_path(&self) -> bool {
        matches!(
            self,
            LeadKind::JobPosting | LeadKind::JobAnnouncement | LeadKind::FreshJobPosting
        )
    }
}

impl From<SignalCategory> for LeadKind {
    fn from(c: SignalCategory) -> Self {
        match c {
            SignalCategory::Funding => LeadKind::Funding,
            SignalCategory::Expansion => LeadKind::Expansion,
            SignalCategory::Jobs => LeadKind::Jobs,
            SignalCategory::Linkedin => LeadKind::Linkedin,
        }
    }
}

impl std::fmt::Display for LeadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized INR amount. `lakhs` is `inr / 100_000` (see `funding` for the
/// one notation that keeps the number as written).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingAmount {
    /// Exact matched substring, trimmed. Display/audit only.
    pub raw_text: String,
    /// Whole rupees.
    pub inr: u64,
    pub lakhs: f64,
}

/// Seniority bucket derived from a job title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Senior,
    Junior,
    Management,
    Internship,
    #[serde(rename = "Mid-Level")]
    MidLevel,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Senior => "Senior",
            JobType::Junior => "Junior",
            JobType::Management => "Management",
            JobType::Internship => "Internship",
            JobType::MidLevel => "Mid-Level",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingFreshness {
    /// Raw date hint as seen in the record ("2 hours ago", "2025-03-01", ...).
    pub hint: String,
    pub is_recent: bool,
}

/// Output unit of the engine. Built once, never mutated after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub company: String,
    pub kind: LeadKind,
    pub score: u32,
    /// `None` means "not applicable" (job leads, or no amount in the text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<FundingAmount>,
    /// Matched geography keywords, comma-joined.
    pub geo: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub industries: Vec<String>,
    pub source: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting_freshness: Option<PostingFreshness>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_match_wire_names() {
        let k = LeadKind::FreshJobPosting;
        assert_eq!(k.as_str(), "fresh_job_posting");
        assert_eq!(serde_json::to_string(&k).unwrap(), "\"fresh_job_posting\"");
        assert!(k.is_job_path());
        assert!(!LeadKind::from(SignalCategory::Jobs).is_job_path());
    }

    #[test]
    fn job_type_serializes_mid_level_with_hyphen() {
        let s = serde_json::to_string(&JobType::MidLevel).unwrap();
        assert_eq!(s, "\"Mid-Level\"");
    }
}
