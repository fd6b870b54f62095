// src/company.rs
//! Company-name recovery from a title / snippet / link triple.
//!
//! Extraction is an ordered list of `NameStrategy` objects evaluated with
//! short-circuit iteration; the first strategy yielding an acceptable name
//! wins. Two chains exist:
//!
//! - news: query pattern → longest capitalized run → single capitalized word → publisher
//! - jobs: query pattern → link domain → hiring phrases → longest capitalized run
//!   → single capitalized word
//!
//! Name hygiene lives in `clean_company_name` (idempotent) and the two
//! acceptance predicates `accepts_pattern_capture` / `is_valid_company_name`.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Generic words that are never a company on their own (pattern captures,
/// news-lead validation).
pub const GENERIC_WORDS: &[&str] = &[
    "company",
    "companies",
    "firm",
    "startup",
    "startups",
    "jobs",
    "job",
    "hiring",
    "careers",
    "career",
    "the",
    "this",
    "that",
    "new",
    "report",
    "reports",
    "news",
    "top",
    "best",
    "latest",
    "breaking",
    "exclusive",
    "update",
    "today",
    "funding",
    "investment",
    "investors",
    "india",
    "indian",
    "business",
    "market",
    "sources",
    "watch",
    "video",
];

/// Words that disqualify a name when they are the whole name or its first /
/// last word (job-path validation).
pub const NAME_BLACKLIST: &[&str] = &[
    "software",
    "engineer",
    "engineers",
    "developer",
    "developers",
    "careers",
    "career",
    "jobs",
    "job",
    "apply",
    "hiring",
    "hire",
    "remote",
    "india",
    "bangalore",
    "bengaluru",
    "mumbai",
    "delhi",
    "hyderabad",
    "chennai",
    "pune",
    "gurgaon",
    "gurugram",
    "noida",
    "kolkata",
    "senior",
    "junior",
    "intern",
    "internship",
    "fresher",
    "freshers",
    "full",
    "part",
    "time",
    "company",
    "team",
    "work",
    "home",
    "linkedin",
    "naukri",
    "indeed",
    "glassdoor",
    "search",
    "results",
    "openings",
    "opening",
    "vacancy",
    "vacancies",
    "urgent",
    "immediate",
    "walk",
    "latest",
    "new",
    "the",
    "top",
    "best",
    "breaking",
    "news",
    "join",
    "now",
    "today",
    "posted",
    "ago",
    "salary",
    "experience",
    "location",
    "backend",
    "frontend",
    "fullstack",
    "us",
    "our",
    "we",
    "you",
    "your",
    "my",
    "a",
    "an",
];

/// Job boards, aggregators and social sites: their domain never names the employer.
const NON_EMPLOYER_DOMAINS: &[&str] = &[
    "linkedin.com",
    "naukri.com",
    "indeed.com",
    "indeed.co.in",
    "glassdoor.com",
    "glassdoor.co.in",
    "monster.com",
    "monsterindia.com",
    "foundit.in",
    "shine.com",
    "timesjobs.com",
    "instahyre.com",
    "wellfound.com",
    "angel.co",
    "cutshort.io",
    "hirist.com",
    "hirist.tech",
    "iimjobs.com",
    "internshala.com",
    "apna.co",
    "workindia.in",
    "freshersworld.com",
    "ziprecruiter.com",
    "simplyhired.com",
    "lever.co",
    "greenhouse.io",
    "myworkdayjobs.com",
    "google.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "youtube.com",
    "instagram.com",
    "medium.com",
    "github.com",
    "reddit.com",
    "quora.com",
];

const TWO_PART_SUFFIXES: &[&str] = &[
    "co.in", "org.in", "net.in", "firm.in", "gen.in", "ind.in", "ac.in", "gov.in", "co.uk",
    "org.uk", "com.au", "com.sg", "co.jp",
];

/// Bounded capitalized phrase (1–4 tokens) used by the hiring-phrase patterns.
const CAP_PHRASE: &str = r"\b([A-Z][A-Za-z0-9&.'\-]*(?:[ \t]+[A-Z][A-Za-z0-9&.'\-]*){0,3})";

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));
static RE_LEADING_THE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^the\s+").expect("the regex"));
static RE_POSSESSIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"['’][sS]$").expect("possessive"));
static RE_LEGAL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\s,]+(?:inc|ltd|llc|llp|pvt|corp|corporation|limited|private|co)\.?$")
        .expect("legal suffix regex")
});
static RE_CAP_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z0-9&.\-]*(?:[ \t]+[A-Z][A-Za-z0-9&.\-]*)+").expect("cap run regex")
});
static RE_CAP_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Za-z0-9&]+\b").expect("cap word regex"));

/* ----------------------------
Name hygiene
---------------------------- */

/// Strip a leading "The", possessive "'s", trailing legal suffixes and stray
/// punctuation; collapse whitespace. Runs to a fixed point, so cleaning an
/// already-clean name returns it unchanged.
pub fn clean_company_name(raw: &str) -> String {
    let mut cur = clean_once(raw);
    loop {
        let next = clean_once(&cur);
        if next == cur {
            return next;
        }
        cur = next;
    }
}

fn clean_once(s: &str) -> String {
    let s = RE_WS.replace_all(s, " ");
    let s = s.trim_matches(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                ',' | '.' | '-' | ':' | ';' | '|' | '!' | '?' | '"' | '(' | ')' | '[' | ']' | '–' | '—' | '&'
            )
    });
    let s = RE_LEADING_THE.replace(s, "");
    let s = RE_POSSESSIVE.replace(&s, "");
    let s = RE_LEGAL_SUFFIX.replace(&s, "");
    s.trim().to_string()
}

fn starts_with_letter(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_alphabetic())
}

fn words_lower(name: &str) -> Vec<String> {
    name.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Acceptance for a query-pattern capture: not a generic word, starts with a
/// letter, and multi-word or longer than 2 chars.
pub fn accepts_pattern_capture(name: &str) -> bool {
    if name.is_empty() || !starts_with_letter(name) {
        return false;
    }
    let lower = name.to_lowercase();
    if GENERIC_WORDS.contains(&lower.as_str()) {
        return false;
    }
    name.split_whitespace().count() > 1 || name.chars().count() > 2
}

/// Shared shape check for names recovered from free text.
pub fn is_valid_company_name(name: &str) -> bool {
    let len = name.chars().count();
    if !(2..=40).contains(&len) || !starts_with_letter(name) {
        return false;
    }

    let lower = name.to_lowercase();
    if NAME_BLACKLIST.contains(&lower.as_str()) {
        return false;
    }
    let words = words_lower(name);
    let edge_blacklisted = |w: Option<&String>| w.is_some_and(|w| NAME_BLACKLIST.contains(&w.as_str()));
    if edge_blacklisted(words.first()) || edge_blacklisted(words.last()) {
        return false;
    }

    if !lower.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')) {
        return false;
    }

    // unresolved acronyms
    let has_lower = name.chars().any(|c| c.is_lowercase());
    if !has_lower && len > 4 {
        return false;
    }
    true
}

fn accepts_free_text(name: &str) -> bool {
    accepts_pattern_capture(name) && is_valid_company_name(name)
}

/// Company name from a link's registrable domain, unless the link points at a
/// job board or social site. `careers.` / `jobs.` subdomains resolve to the
/// parent domain.
pub fn company_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if NON_EMPLOYER_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
    {
        return None;
    }

    let mut labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    while labels.len() > 2 && matches!(labels[0], "careers" | "jobs" | "www") {
        labels.remove(0);
    }

    let n = labels.len();
    let suffix_len = if n >= 3 && TWO_PART_SUFFIXES.contains(&format!("{}.{}", labels[n - 2], labels[n - 1]).as_str()) {
        2
    } else {
        1
    };
    if n <= suffix_len {
        return None;
    }
    let label = labels[n - suffix_len - 1];

    let name = label
        .split(['-', '_'])
        .filter(|seg| !seg.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    let len = name.chars().count();
    ((2..=30).contains(&len) && starts_with_letter(&name)).then_some(name)
}

fn capitalize(seg: &str) -> String {
    let mut chars = seg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/* ----------------------------
Strategy chain
---------------------------- */

/// Everything a strategy may look at. `query_pattern` is the category regex
/// (one capture group), `fallback_source` the publisher name on the news path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionInput<'a> {
    pub title: &'a str,
    pub snippet: &'a str,
    pub link: &'a str,
    pub query_pattern: Option<&'a Regex>,
    pub fallback_source: Option<&'a str>,
}

impl ExtractionInput<'_> {
    fn combined(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }
}

pub trait NameStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String>;
}

/// Category regex against the title.
pub struct QueryPattern;

impl NameStrategy for QueryPattern {
    fn name(&self) -> &'static str {
        "query_pattern"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let re = input.query_pattern?;
        re.captures_iter(input.title)
            .filter_map(|c| c.get(1))
            .map(|m| clean_company_name(m.as_str()))
            .find(|n| accepts_pattern_capture(n))
    }
}

pub struct LinkDomain;

impl NameStrategy for LinkDomain {
    fn name(&self) -> &'static str {
        "link_domain"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        company_from_link(input.link)
    }
}

/// Which side of the capture the hiring keyword sits on. Rejected captures are
/// retried with words trimmed from the side away from the keyword.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    /// "X is hiring": trim leading words
    NameBefore,
    /// "Careers at X": trim trailing words
    NameAfter,
}

/// One free-text hiring phrase ("X is hiring", "Join X", ...).
pub struct HiringPhrase {
    label: &'static str,
    re: Regex,
    anchor: Anchor,
}

impl HiringPhrase {
    fn new(label: &'static str, pattern: String, anchor: Anchor) -> Self {
        Self {
            label,
            re: Regex::new(&pattern).expect("hiring phrase regex"),
            anchor,
        }
    }

    /// The standard job-path phrases, in evaluation order.
    pub fn standard() -> Vec<HiringPhrase> {
        use Anchor::*;
        vec![
            Self::new("is_hiring", format!(r"{CAP_PHRASE}\s+(?i:is\s+hiring)\b"), NameBefore),
            Self::new("join", format!(r"\b(?i:join)\s+{CAP_PHRASE}"), NameAfter),
            Self::new(
                "has_openings",
                format!(r"{CAP_PHRASE}\s+(?i:has\s+(?:job\s+)?(?:openings|vacancies))"),
                NameBefore,
            ),
            Self::new("careers_at", format!(r"(?i:careers\s+at)\s+{CAP_PHRASE}"), NameAfter),
            Self::new("dash_hiring", format!(r"{CAP_PHRASE}\s+[-–—]\s+(?i:hiring)\b"), NameBefore),
            Self::new("pipe_hiring", format!(r"{CAP_PHRASE}\s*\|\s*(?i:hiring)\b"), NameBefore),
            Self::new(
                "role_at",
                format!(r"(?i:software\s+(?:engineer|developer))\s+(?i:at|in)\s+{CAP_PHRASE}"),
                NameAfter,
            ),
        ]
    }

    fn variants(&self, capture: &str) -> Vec<String> {
        let words: Vec<&str> = capture.split_whitespace().collect();
        (0..words.len())
            .map(|k| match self.anchor {
                Anchor::NameBefore => words[k..].join(" "),
                Anchor::NameAfter => words[..words.len() - k].join(" "),
            })
            .collect()
    }
}

impl NameStrategy for HiringPhrase {
    fn name(&self) -> &'static str {
        self.label
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let text = input.combined();
        self.re
            .captures_iter(&text)
            .filter_map(|c| c.get(1))
            .flat_map(|m| self.variants(m.as_str()))
            .map(|v| clean_company_name(&v))
            .find(|n| is_valid_company_name(n))
    }
}

/// Longest capitalized multi-word sequence in title + snippet.
pub struct LongestCapitalizedRun;

impl NameStrategy for LongestCapitalizedRun {
    fn name(&self) -> &'static str {
        "capitalized_run"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let text = input.combined();
        let mut runs: Vec<String> = RE_CAP_RUN
            .find_iter(&text)
            .map(|m| clean_company_name(m.as_str()))
            .filter(|n| n.split_whitespace().count() > 1)
            .collect();
        // stable: equal lengths keep text order
        runs.sort_by_key(|r| std::cmp::Reverse(r.chars().count()));
        runs.into_iter().find(|n| accepts_free_text(n))
    }
}

pub struct SingleCapitalizedWord;

impl NameStrategy for SingleCapitalizedWord {
    fn name(&self) -> &'static str {
        "capitalized_word"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let text = input.combined();
        RE_CAP_WORD
            .find_iter(&text)
            .map(|m| clean_company_name(m.as_str()))
            .find(|n| accepts_free_text(n))
    }
}

/// News path only: the publisher name when nothing in the text qualifies.
pub struct PublisherName;

impl NameStrategy for PublisherName {
    fn name(&self) -> &'static str {
        "publisher"
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let name = clean_company_name(input.fallback_source?);
        accepts_pattern_capture(&name).then_some(name)
    }
}

pub struct CompanyExtractor {
    strategies: Vec<Box<dyn NameStrategy>>,
}

impl std::fmt::Debug for CompanyExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyExtractor")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl CompanyExtractor {
    pub fn with_strategies(strategies: Vec<Box<dyn NameStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn for_news() -> Self {
        Self::with_strategies(vec![
            Box::new(QueryPattern),
            Box::new(LongestCapitalizedRun),
            Box::new(SingleCapitalizedWord),
            Box::new(PublisherName),
        ])
    }

    pub fn for_jobs() -> Self {
        let mut strategies: Vec<Box<dyn NameStrategy>> =
            vec![Box::new(QueryPattern), Box::new(LinkDomain)];
        for phrase in HiringPhrase::standard() {
            strategies.push(Box::new(phrase));
        }
        strategies.push(Box::new(LongestCapitalizedRun));
        strategies.push(Box::new(SingleCapitalizedWord));
        Self::with_strategies(strategies)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// First acceptable name from the chain, or `None` (no lead is built).
    pub fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        self.strategies.iter().find_map(|s| {
            let name = s.extract(input)?;
            tracing::trace!(target: "leads", strategy = s.name(), company = %name, "company extracted");
            Some(name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaning_strips_suffixes_and_is_idempotent() {
        assert_eq!(clean_company_name("TechCorp Pvt"), "TechCorp");
        assert_eq!(clean_company_name("The  Acme Labs Pvt. Ltd."), "Acme Labs");
        assert_eq!(clean_company_name("Zeta's"), "Zeta");
        assert_eq!(clean_company_name("Globex Corp, Inc"), "Globex");
        for raw in ["The Acme Labs Pvt. Ltd.", "  Foo  Bar LLC ", "Zeta's", "Private Limited"] {
            let once = clean_company_name(raw);
            assert_eq!(clean_company_name(&once), once, "{raw}");
        }
    }

    #[test]
    fn validity_rules() {
        assert!(is_valid_company_name("Acme Labs"));
        assert!(is_valid_company_name("IBM"));
        assert!(!is_valid_company_name("A"));
        assert!(!is_valid_company_name("Software"));
        assert!(!is_valid_company_name("Senior Acme"));
        assert!(!is_valid_company_name("Acme Bengaluru"));
        assert!(!is_valid_company_name("TCS"));
        assert!(!is_valid_company_name("ACME LABS"));
        assert!(!is_valid_company_name(&"Abc".repeat(14)));
        assert!(!is_valid_company_name("9am Ventures"));
    }

    #[test]
    fn pattern_capture_acceptance() {
        assert!(accepts_pattern_capture("Zoho"));
        assert!(accepts_pattern_capture("Go Ai"));
        assert!(!accepts_pattern_capture("Ax"));
        assert!(!accepts_pattern_capture("Startup"));
        assert!(!accepts_pattern_capture("3M"));
    }

    #[test]
    fn domain_extraction() {
        assert_eq!(company_from_link("https://careers.acme.com/jobs/1").as_deref(), Some("Acme"));
        assert_eq!(company_from_link("https://www.tech-corp.co.in/x").as_deref(), Some("Tech Corp"));
        assert_eq!(company_from_link("https://jobs.blue-river.io").as_deref(), Some("Blue River"));
        assert_eq!(company_from_link("https://in.linkedin.com/jobs/view/1"), None);
        assert_eq!(company_from_link("https://www.naukri.com/job-listings"), None);
        assert_eq!(company_from_link("not a url"), None);
        assert_eq!(company_from_link(""), None);
    }

    #[test]
    fn job_chain_prefers_domain_then_phrases() {
        let ex = CompanyExtractor::for_jobs();
        let input = ExtractionInput {
            title: "Backend Engineer - Remote",
            link: "https://careers.quantlabs.com/openings/42",
            ..Default::default()
        };
        assert_eq!(ex.extract(&input).as_deref(), Some("Quantlabs"));

        let input = ExtractionInput {
            title: "Senior Software Engineer Nimbus Cloud is hiring in Pune",
            link: "https://www.linkedin.com/jobs/view/9",
            ..Default::default()
        };
        assert_eq!(ex.extract(&input).as_deref(), Some("Nimbus Cloud"));

        let input = ExtractionInput {
            title: "Software Engineer at Orbit Analytics",
            snippet: "Apply now",
            link: "https://in.indeed.com/viewjob?jk=1",
            ..Default::default()
        };
        assert_eq!(ex.extract(&input).as_deref(), Some("Orbit Analytics"));
    }

    #[test]
    fn news_chain_falls_back_to_publisher() {
        let ex = CompanyExtractor::for_news();
        let input = ExtractionInput {
            title: "funding round closes",
            snippet: "details inside",
            fallback_source: Some("Inc42"),
            ..Default::default()
        };
        assert_eq!(ex.extract(&input).as_deref(), Some("Inc42"));

        let input = ExtractionInput {
            title: "news about the startup",
            fallback_source: Some("News"),
            ..Default::default()
        };
        assert_eq!(ex.extract(&input), None);
    }

    #[test]
    fn chain_order_is_reported() {
        let ex = CompanyExtractor::for_news();
        assert_eq!(
            ex.strategy_names(),
            vec!["query_pattern", "capitalized_run", "capitalized_word", "publisher"]
        );
    }
}
