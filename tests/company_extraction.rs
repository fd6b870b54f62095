// tests/company_extraction.rs
use lead_radar::company::{GENERIC_WORDS, NAME_BLACKLIST};
use lead_radar::{clean_company_name, CompanyExtractor, ExtractionInput, LeadConfig, SignalCategory};
use regex::Regex;

const TITLES: &[&str] = &[
    "Startup raises funding",
    "The Company Is Hiring",
    "Breaking News Today",
    "Jobs Jobs Jobs",
    "Hiring Now - Apply Today",
    "Software Engineer Jobs in Pune",
    "Latest Funding Report",
    "TechCorp Pvt raises ₹5,00,000 in Bengaluru",
    "Careers at Nimbus Cloud",
    "India",
];

fn funding_pattern() -> Regex {
    let cfg = LeadConfig::default_seed();
    Regex::new(&cfg.query(SignalCategory::Funding).unwrap().pattern).unwrap()
}

#[test]
fn news_chain_never_returns_a_generic_word() {
    let re = funding_pattern();
    let ex = CompanyExtractor::for_news();
    for t in TITLES {
        let input = ExtractionInput {
            title: t,
            query_pattern: Some(&re),
            fallback_source: Some("News"),
            ..Default::default()
        };
        if let Some(name) = ex.extract(&input) {
            assert!(
                !GENERIC_WORDS.contains(&name.to_lowercase().as_str()),
                "{t:?} -> {name:?}"
            );
        }
    }
}

#[test]
fn job_chain_never_returns_a_blacklisted_word() {
    let ex = CompanyExtractor::for_jobs();
    for t in TITLES {
        let input = ExtractionInput {
            title: t,
            snippet: "Apply on the portal",
            link: "https://www.naukri.com/job-listings-1",
            ..Default::default()
        };
        if let Some(name) = ex.extract(&input) {
            let lower = name.to_lowercase();
            assert!(!NAME_BLACKLIST.contains(&lower.as_str()), "{t:?} -> {name:?}");
            let first = lower.split_whitespace().next().unwrap_or_default();
            let last = lower.split_whitespace().last().unwrap_or_default();
            assert!(!NAME_BLACKLIST.contains(&first), "{t:?} -> {name:?}");
            assert!(!NAME_BLACKLIST.contains(&last), "{t:?} -> {name:?}");
        }
    }
}

#[test]
fn cleaning_is_idempotent() {
    for raw in [
        "TechCorp Pvt",
        "The Acme Labs Pvt. Ltd.",
        "  Zeta's ",
        "Globex Corporation, Inc.",
        "Foo Private Limited",
        "Blue River LLP",
        "\"Quoted Co.\"",
        "",
    ] {
        let once = clean_company_name(raw);
        assert_eq!(clean_company_name(&once), once, "{raw:?}");
    }
}

#[test]
fn query_pattern_strips_legal_suffix() {
    let re = funding_pattern();
    let input = ExtractionInput {
        title: "TechCorp Pvt raises ₹5,00,000 in Bengaluru",
        snippet: "Funding for expansion in India",
        query_pattern: Some(&re),
        ..Default::default()
    };
    assert_eq!(
        CompanyExtractor::for_news().extract(&input).as_deref(),
        Some("TechCorp")
    );
}

#[test]
fn pronouns_after_join_are_not_companies() {
    let ex = CompanyExtractor::for_jobs();
    for t in [
        "Join Us: Backend Engineer role in Pune",
        "Join Our Team - Backend Engineer, Pune",
    ] {
        let input = ExtractionInput {
            title: t,
            link: "https://www.naukri.com/job-listings-7",
            ..Default::default()
        };
        assert_eq!(ex.extract(&input), None, "{t:?}");
    }

    let input = ExtractionInput {
        title: "Join Zeta Labs as a Backend Engineer",
        link: "https://www.naukri.com/job-listings-8",
        ..Default::default()
    };
    assert_eq!(ex.extract(&input).as_deref(), Some("Zeta Labs"));
}

#[test]
fn trailing_ampersand_is_trimmed() {
    assert_eq!(clean_company_name("Acme & Co"), "Acme");
    assert_eq!(clean_company_name("Acme & Co."), "Acme");
    assert_eq!(clean_company_name("Tata & Sons"), "Tata & Sons");
}
