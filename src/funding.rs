// src/funding.rs
//! INR funding extraction as an ordered chain of notation parsers.
//!
//! Chain (first success wins):
//! 1. explicit rupee notation (`₹`, `INR`, `Rs.`)
//! 2. `lakh` / `lakhs` / `l` / `lac` / `lacs` suffix
//! 3. `crore` / `crores` / `cr` suffix
//! 4. bare Indian-grouped numeral (`5,00,000`)
//!
//! Text carrying `€`, `£` or `$` is rejected up front: amounts are INR only.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::FundingAmount;

const RUPEES_PER_LAKH: f64 = 100_000.0;
const RUPEES_PER_CRORE: f64 = 10_000_000.0;

/// Upper bound that still round-trips through `u64`.
const MAX_RUPEES: f64 = 9.0e18;

static RE_RUPEE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:₹|\bINR|\bRs\.?)\s*([0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?)(\s*(?:lakhs?|lacs?|l|crores?|cr)\b)?",
    )
    .expect("rupee regex")
});

static RE_LAKH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?:₹|\bINR|\bRs\.?)\s*)?([0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?)\s*(?:lakhs?|lacs?|l)\b",
    )
    .expect("lakh regex")
});

static RE_CRORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?:₹|\bINR|\bRs\.?)\s*)?([0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?)\s*(?:crores?|cr)\b",
    )
    .expect("crore regex")
});

static RE_INDIAN_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{1,3}(?:,[0-9]{2,3})+\b").expect("grouped regex"));

/// One notation in the chain. Implementations return `None` on any non-match,
/// including numbers that fail to parse to a finite value.
pub trait FundingNotation: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, text: &str) -> Option<FundingAmount>;
}

/// `₹5,00,000`, `INR 12,500.75`, `Rs. 40000`. Declines when a lakh/crore unit
/// follows the number so the unit parsers further down handle it.
pub struct RupeeSymbol;

impl FundingNotation for RupeeSymbol {
    fn name(&self) -> &'static str {
        "rupee_symbol"
    }

    fn parse(&self, text: &str) -> Option<FundingAmount> {
        let caps = RE_RUPEE.captures(text)?;
        if caps.get(2).is_some() {
            return None;
        }
        let n = parse_number(caps.get(1)?.as_str())?;
        let inr = to_rupees(n)?;
        Some(FundingAmount {
            raw_text: caps.get(0)?.as_str().trim().to_string(),
            inr,
            lakhs: round4(inr as f64 / RUPEES_PER_LAKH),
        })
    }
}

/// `50 lakh`, `2.5 lacs`, `10L`. `lakhs` keeps the number as written
/// (no 4-digit rounding, unlike the other notations).
pub struct LakhSuffix;

impl FundingNotation for LakhSuffix {
    fn name(&self) -> &'static str {
        "lakh_suffix"
    }

    fn parse(&self, text: &str) -> Option<FundingAmount> {
        let caps = RE_LAKH.captures(text)?;
        let n = parse_number(caps.get(1)?.as_str())?;
        let inr = to_rupees(n * RUPEES_PER_LAKH)?;
        Some(FundingAmount {
            raw_text: caps.get(0)?.as_str().trim().to_string(),
            inr,
            lakhs: n,
        })
    }
}

/// `2.5 crore`, `₹100 Cr`.
pub struct CroreSuffix;

impl FundingNotation for CroreSuffix {
    fn name(&self) -> &'static str {
        "crore_suffix"
    }

    fn parse(&self, text: &str) -> Option<FundingAmount> {
        let caps = RE_CRORE.captures(text)?;
        let n = parse_number(caps.get(1)?.as_str())?;
        let inr = to_rupees(n * RUPEES_PER_CRORE)?;
        Some(FundingAmount {
            raw_text: caps.get(0)?.as_str().trim().to_string(),
            inr,
            lakhs: round4(inr as f64 / RUPEES_PER_LAKH),
        })
    }
}

/// Bare `5,00,000` with no unit word, read as rupees.
pub struct IndianGrouped;

impl FundingNotation for IndianGrouped {
    fn name(&self) -> &'static str {
        "indian_grouped"
    }

    fn parse(&self, text: &str) -> Option<FundingAmount> {
        let m = RE_INDIAN_GROUPED.find(text)?;
        let n = parse_number(m.as_str())?;
        let inr = to_rupees(n)?;
        Some(FundingAmount {
            raw_text: m.as_str().trim().to_string(),
            inr,
            lakhs: round4(inr as f64 / RUPEES_PER_LAKH),
        })
    }
}

pub struct FundingParser {
    notations: Vec<Box<dyn FundingNotation>>,
}

impl Default for FundingParser {
    fn default() -> Self {
        Self::with_notations(vec![
            Box::new(RupeeSymbol),
            Box::new(LakhSuffix),
            Box::new(CroreSuffix),
            Box::new(IndianGrouped),
        ])
    }
}

impl std::fmt::Debug for FundingParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundingParser")
            .field(
                "notations",
                &self.notations.iter().map(|n| n.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FundingParser {
    pub fn with_notations(notations: Vec<Box<dyn FundingNotation>>) -> Self {
        Self { notations }
    }

    /// Extract and normalize the first INR amount found in `text`.
    pub fn parse(&self, text: &str) -> Option<FundingAmount> {
        if has_foreign_currency(text) {
            return None;
        }
        self.notations.iter().find_map(|n| n.parse(text))
    }
}

fn has_foreign_currency(text: &str) -> bool {
    text.contains(['€', '£', '$'])
}

/// Strip thousands separators and parse. Non-finite or negative ⇒ `None`.
fn parse_number(digits: &str) -> Option<f64> {
    let n: f64 = digits.replace(',', "").parse().ok()?;
    (n.is_finite() && n >= 0.0).then_some(n)
}

fn to_rupees(n: f64) -> Option<u64> {
    let r = n.round();
    (r.is_finite() && (0.0..MAX_RUPEES).contains(&r)).then_some(r as u64)
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
