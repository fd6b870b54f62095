// src/config/mod.rs
//! Engine configuration: keyword lists, score floors, limits, scoring weights
//! and the per-category signal queries.
//!
//! Resolution order for `LeadConfig::load_default()`:
//! 1) $LEAD_CONFIG_PATH (TOML or JSON, by extension)
//! 2) config/leads.toml
//! 3) config/leads.json
//! 4) built-in `default_seed()`
//!
//! Score floors can be overridden with LEAD_NEWS_MIN_SCORE / LEAD_JOB_MIN_SCORE.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::ScoreWeights;
use crate::types::{SignalCategory, SignalQuery};

pub const DEFAULT_CONFIG_TOML: &str = "config/leads.toml";
pub const DEFAULT_CONFIG_JSON: &str = "config/leads.json";

pub const ENV_CONFIG_PATH: &str = "LEAD_CONFIG_PATH";
pub const ENV_NEWS_MIN_SCORE: &str = "LEAD_NEWS_MIN_SCORE";
pub const ENV_JOB_MIN_SCORE: &str = "LEAD_JOB_MIN_SCORE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoSection {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSection {
    #[serde(default)]
    pub industry: Vec<String>,
    #[serde(default)]
    pub hiring: Vec<String>,
    #[serde(default)]
    pub india_hiring: Vec<String>,
    #[serde(default)]
    pub well_known_companies: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub news_min_score: u32,
    pub job_min_score: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            news_min_score: 15,
            job_min_score: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_items_per_platform: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_items_per_platform: 25,
        }
    }
}

/// Read-only engine configuration. Missing sections fall back to the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadConfig {
    pub geo: GeoSection,
    pub keywords: KeywordSection,
    pub thresholds: Thresholds,
    pub limits: Limits,
    pub scoring: ScoreWeights,
    pub queries: Vec<SignalQuery>,
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl LeadConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: LeadConfig = toml::from_str(s).context("parsing lead config TOML")?;
        Ok(cfg.sanitized())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: LeadConfig = serde_json::from_str(s).context("parsing lead config JSON")?;
        Ok(cfg.sanitized())
    }

    /// Load from an explicit path. `.json` is parsed as JSON, anything else as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lead config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if ext == "json" {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Load using env var + fallbacks, then apply env overrides for score floors.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_CONFIG_TOML).exists() {
            Self::load_from(Path::new(DEFAULT_CONFIG_TOML))?
        } else if Path::new(DEFAULT_CONFIG_JSON).exists() {
            Self::load_from(Path::new(DEFAULT_CONFIG_JSON))?
        } else {
            Self::default_seed()
        };

        if let Some(v) = parse_floor_env(std::env::var(ENV_NEWS_MIN_SCORE).ok()) {
            cfg.thresholds.news_min_score = v;
        }
        if let Some(v) = parse_floor_env(std::env::var(ENV_JOB_MIN_SCORE).ok()) {
            cfg.thresholds.job_min_score = v;
        }
        Ok(cfg)
    }

    /// Query descriptor for a category, if configured.
    pub fn query(&self, category: SignalCategory) -> Option<&SignalQuery> {
        self.queries.iter().find(|q| q.name == category)
    }

    /// Trim list entries and drop empty ones. Order and duplicates are kept:
    /// the geo matcher reports hits in configuration order.
    fn sanitized(mut self) -> Self {
        for list in [
            &mut self.geo.keywords,
            &mut self.keywords.industry,
            &mut self.keywords.hiring,
            &mut self.keywords.india_hiring,
            &mut self.keywords.well_known_companies,
        ] {
            clean_list(list);
        }
        self
    }

    /// Built-in configuration for Indian funding/hiring signals.
    pub fn default_seed() -> Self {
        fn list(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            geo: GeoSection {
                keywords: list(&[
                    "India",
                    "Bengaluru",
                    "Bangalore",
                    "Mumbai",
                    "Delhi",
                    "Hyderabad",
                    "Chennai",
                    "Pune",
                    "Gurugram",
                    "Gurgaon",
                    "Noida",
                    "Kolkata",
                    "Ahmedabad",
                    "Kochi",
                    "Jaipur",
                    "Chandigarh",
                ]),
            },
            keywords: KeywordSection {
                industry: list(&[
                    "fintech",
                    "edtech",
                    "healthtech",
                    "agritech",
                    "saas",
                    "e-commerce",
                    "ecommerce",
                    "logistics",
                    "cybersecurity",
                    "deeptech",
                    "d2c",
                    "artificial intelligence",
                    "machine learning",
                    "cloud",
                    "software",
                ]),
                hiring: list(&[
                    "hiring",
                    "recruit",
                    "job openings",
                    "vacancies",
                    "headcount",
                    "talent",
                    "expansion",
                    "new office",
                    "workforce",
                    "careers",
                ]),
                india_hiring: list(&[
                    "walk-in",
                    "walk in",
                    "campus drive",
                    "campus placement",
                    "notice period",
                    "immediate joiner",
                    "freshers",
                    "lpa",
                    "ctc",
                ]),
                well_known_companies: list(&[
                    "tcs",
                    "tata consultancy",
                    "infosys",
                    "wipro",
                    "hcl",
                    "tech mahindra",
                    "accenture",
                    "cognizant",
                    "capgemini",
                    "google",
                    "microsoft",
                    "amazon",
                    "flipkart",
                    "swiggy",
                    "zomato",
                    "paytm",
                    "reliance",
                    "razorpay",
                    "zoho",
                    "freshworks",
                ]),
            },
            thresholds: Thresholds::default(),
            limits: Limits::default(),
            scoring: ScoreWeights::default(),
            queries: vec![
                SignalQuery {
                    name: SignalCategory::Funding,
                    pattern: format!(
                        r"{NAME_PHRASE}\s+(?i:raises|raised|secures|bags|closes|gets|lands|receives)\b"
                    ),
                },
                SignalQuery {
                    name: SignalCategory::Expansion,
                    pattern: format!(
                        r"{NAME_PHRASE}\s+(?i:expands|expanding|opens|launches|enters|sets up)\b"
                    ),
                },
                SignalQuery {
                    name: SignalCategory::Jobs,
                    pattern: format!(
                        r"{NAME_PHRASE}\s+(?i:is hiring|hiring|hires|to hire|recruits)\b"
                    ),
                },
                SignalQuery {
                    name: SignalCategory::Linkedin,
                    pattern: format!(r"{NAME_PHRASE}\s+(?i:is hiring|hiring)\b"),
                },
            ],
        }
    }
}

/// Up to five capitalized tokens; shared by the seed query patterns.
const NAME_PHRASE: &str = r"([A-Z][A-Za-z0-9&.\-]*(?:\s+[A-Z][A-Za-z0-9&.\-]*){0,4})";

fn parse_floor_env(raw: Option<String>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

fn clean_list(items: &mut Vec<String>) {
    items.retain_mut(|it| {
        let t = it.trim();
        if t.len() != it.len() {
            *it = t.to_string();
        }
        !it.is_empty()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_seed_sections() {
        let cfg = LeadConfig::from_toml_str(
            r#"
[thresholds]
news_min_score = 30

[geo]
keywords = [" Pune ", "", "Pune"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.thresholds.news_min_score, 30);
        assert_eq!(cfg.thresholds.job_min_score, 20);
        assert_eq!(cfg.geo.keywords, vec!["Pune".to_string(), "Pune".to_string()]);
        assert!(!cfg.keywords.hiring.is_empty());
        assert_eq!(cfg.queries.len(), 4);
    }

    #[test]
    fn seed_has_query_for_every_category() {
        let cfg = LeadConfig::default_seed();
        for c in [
            SignalCategory::Funding,
            SignalCategory::Expansion,
            SignalCategory::Jobs,
            SignalCategory::Linkedin,
        ] {
            let q = cfg.query(c).expect("query configured");
            assert!(regex::Regex::new(&q.pattern).is_ok(), "{}", q.pattern);
        }
    }

    #[test]
    fn floor_env_parsing_ignores_garbage() {
        assert_eq!(parse_floor_env(Some(" 42 ".into())), Some(42));
        assert_eq!(parse_floor_env(Some("-1".into())), None);
        assert_eq!(parse_floor_env(None), None);
    }
}
