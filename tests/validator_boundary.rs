// tests/validator_boundary.rs
use lead_radar::{JobType, Lead, LeadConfig, LeadKind, Rejection, Validator};

fn lead(kind: LeadKind, company: &str, score: u32) -> Lead {
    Lead {
        company: company.into(),
        kind,
        score,
        funding: None,
        geo: "Bengaluru".into(),
        industries: vec![],
        source: "Naukri".into(),
        link: String::new(),
        title: "Backend Engineer".into(),
        description: String::new(),
        published_at: String::new(),
        platform: Some("Naukri".into()),
        job_type: kind.is_job_path().then_some(JobType::MidLevel),
        posting_freshness: None,
    }
}

#[test]
fn news_floor_is_inclusive_at_15() {
    let floor = LeadConfig::default_seed().thresholds.news_min_score;
    assert_eq!(floor, 15);
    let v = Validator::news(floor);
    assert_eq!(v.validate(&lead(LeadKind::Funding, "Acme Labs", 15)), Ok(()));
    assert_eq!(
        v.validate(&lead(LeadKind::Funding, "Acme Labs", 14)),
        Err(Rejection::ScoreBelowFloor)
    );
}

#[test]
fn job_floor_is_inclusive_at_20() {
    let floor = LeadConfig::default_seed().thresholds.job_min_score;
    assert_eq!(floor, 20);
    let v = Validator::jobs(floor);
    assert_eq!(v.validate(&lead(LeadKind::JobPosting, "Acme Labs", 20)), Ok(()));
    assert_eq!(
        v.validate(&lead(LeadKind::JobPosting, "Acme Labs", 19)),
        Err(Rejection::ScoreBelowFloor)
    );
}

#[test]
fn name_length_limits_differ_by_path() {
    let name = format!("Acme {}", "Labs ".repeat(12).trim_end());
    assert!(name.chars().count() > 50 && name.chars().count() <= 80);
    assert_eq!(Validator::news(15).validate(&lead(LeadKind::Funding, &name, 99)), Ok(()));
    assert_eq!(
        Validator::jobs(20).validate(&lead(LeadKind::JobPosting, &name, 99)),
        Err(Rejection::NameLength)
    );
}

#[test]
fn rejection_labels_are_stable() {
    assert_eq!(Rejection::ScoreBelowFloor.to_string(), "score_below_floor");
    assert_eq!(Rejection::NoGeography.as_str(), "no_geography");
}
