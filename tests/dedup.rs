// tests/dedup.rs
use lead_radar::dedup::sort_and_dedupe;
use lead_radar::{dedup_key, dedupe, sort_by_score_desc, Lead, LeadKind};

fn lead(company: &str, source: &str, kind: LeadKind, title: &str, score: u32) -> Lead {
    Lead {
        company: company.into(),
        kind,
        score,
        funding: None,
        geo: "India".into(),
        industries: vec![],
        source: source.into(),
        link: String::new(),
        title: title.into(),
        description: String::new(),
        published_at: String::new(),
        platform: None,
        job_type: None,
        posting_freshness: None,
    }
}

#[test]
fn sort_then_dedupe_keeps_the_higher_score() {
    let mut leads = vec![
        lead("TechCorp", "Inc42", LeadKind::Funding, "first", 18),
        lead("techcorp", "inc42", LeadKind::Funding, "second", 41),
    ];
    sort_by_score_desc(&mut leads);
    let out = dedupe(leads);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].score, 41);
    assert_eq!(out[0].title, "second");
}

#[test]
fn dedupe_is_idempotent() {
    let leads = vec![
        lead("A", "s1", LeadKind::Funding, "", 30),
        lead("A", "s1", LeadKind::Expansion, "", 25),
        lead("A", "s2", LeadKind::Funding, "", 20),
        lead("B", "Naukri", LeadKind::JobPosting, "Backend Engineer", 40),
        lead("B", "Naukri", LeadKind::JobPosting, "Frontend Engineer", 35),
        lead("B", "Naukri", LeadKind::JobPosting, "backend engineer", 10),
    ];
    let (once, removed) = sort_and_dedupe(leads);
    assert_eq!(removed, 2);
    let twice = dedupe(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn news_and_job_keys_are_asymmetric() {
    let news = lead("Acme", "Naukri", LeadKind::Jobs, "Backend Engineer", 1);
    let job = lead("Acme", "Naukri", LeadKind::JobPosting, "Backend Engineer", 1);
    assert_eq!(dedup_key(&news), "acme|naukri");
    assert_eq!(dedup_key(&job), "acme|naukri|backend engineer");
}

#[test]
fn equal_scores_keep_input_order() {
    let mut leads = vec![
        lead("First", "s", LeadKind::Funding, "", 20),
        lead("Second", "s", LeadKind::Funding, "", 20),
        lead("Top", "s", LeadKind::Funding, "", 50),
    ];
    sort_by_score_desc(&mut leads);
    let names: Vec<_> = leads.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(names, ["Top", "First", "Second"]);
}
