// src/validate.rs
//! Minimum-quality gates for constructed leads. Failing a gate is not an
//! error: the candidate is dropped and the reason is only counted and logged.

use crate::company::{is_valid_company_name, GENERIC_WORDS, NAME_BLACKLIST};
use crate::types::Lead;

/// Why a record did not become a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    NoGeography,
    NoCompany,
    EmptyCompany,
    NameLength,
    NotStartingWithLetter,
    BlacklistedName,
    ScoreBelowFloor,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NoGeography => "no_geography",
            Rejection::NoCompany => "no_company",
            Rejection::EmptyCompany => "empty_company",
            Rejection::NameLength => "name_length",
            Rejection::NotStartingWithLetter => "not_starting_with_letter",
            Rejection::BlacklistedName => "blacklisted_name",
            Rejection::ScoreBelowFloor => "score_below_floor",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    max_name_len: usize,
    blacklist: &'static [&'static str],
    min_score: u32,
    /// Job leads additionally run the shared free-text name check.
    strict_names: bool,
}

impl Validator {
    /// News-derived leads: names up to 80 chars, generic-word blacklist.
    pub fn news(min_score: u32) -> Self {
        Self {
            max_name_len: 80,
            blacklist: GENERIC_WORDS,
            min_score,
            strict_names: false,
        }
    }

    /// Job-derived leads: names up to 50 chars, job blacklist + shape check.
    pub fn jobs(min_score: u32) -> Self {
        Self {
            max_name_len: 50,
            blacklist: NAME_BLACKLIST,
            min_score,
            strict_names: true,
        }
    }

    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    pub fn validate(&self, lead: &Lead) -> Result<(), Rejection> {
        let name = lead.company.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyCompany);
        }
        let len = name.chars().count();
        if len < 2 || len > self.max_name_len {
            return Err(Rejection::NameLength);
        }
        if !name.chars().next().is_some_and(|c| c.is_alphabetic()) {
            return Err(Rejection::NotStartingWithLetter);
        }
        let lower = name.to_lowercase();
        if self.blacklist.contains(&lower.as_str())
            || (self.strict_names && !is_valid_company_name(name))
        {
            return Err(Rejection::BlacklistedName);
        }
        if lead.geo.trim().is_empty() {
            return Err(Rejection::NoGeography);
        }
        if lead.score < self.min_score {
            return Err(Rejection::ScoreBelowFloor);
        }
        Ok(())
    }
}
