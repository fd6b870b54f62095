// tests/providers_json.rs
use lead_radar::ingest::providers::JsonFileProvider;
use lead_radar::ingest::{collect_batches, AtomicRequestCounter, RequestCounter};
use lead_radar::{BatchOrigin, JobScan, LeadConfig, LeadKind, LeadPipeline, SignalCategory, SourceProvider};

const JOBS_BATCH: &str = r#"{
  "origin": { "path": "jobs", "platform": "LinkedIn", "search_term": "software engineer", "scan": "announcements" },
  "records": [
    {
      "title": "Software Engineer at Orbit Analytics",
      "description": "interviews in Hyderabad this Saturday, walk-in for freshers.",
      "url": "https://in.linkedin.com/jobs/view/123",
      "posting_hint": "1 day ago",
      "location": "Hyderabad, Telangana"
    },
    { "title": "   ", "description": "blank title is dropped" }
  ]
}"#;

fn news_origin() -> BatchOrigin {
    BatchOrigin::News {
        query: SignalCategory::Expansion,
    }
}

#[tokio::test]
async fn batch_object_keeps_its_own_origin() {
    let p = JsonFileProvider::from_fixture(news_origin(), JOBS_BATCH);
    let batch = p.fetch_batch().await.unwrap();
    match &batch.origin {
        BatchOrigin::Jobs(js) => {
            assert_eq!(js.platform, "LinkedIn");
            assert_eq!(js.scan, JobScan::Announcements);
        }
        other => panic!("unexpected origin {other:?}"),
    }
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[0].location.as_deref(), Some("Hyderabad, Telangana"));
}

#[tokio::test]
async fn reads_array_from_disk_and_counts_requests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expansion.json");
    std::fs::write(
        &path,
        r#"[{"title":"Zephyr Foods opens new office in Mumbai","source":"YourStory","snippet":null}]"#,
    )
    .unwrap();

    let providers: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(JsonFileProvider::from_path(news_origin(), &path)),
        Box::new(JsonFileProvider::from_path(news_origin(), dir.path().join("missing.json"))),
        Box::new(JsonFileProvider::from_fixture(news_origin(), JOBS_BATCH)),
    ];
    let counter = AtomicRequestCounter::default();
    let (batches, failed) = collect_batches(&providers, Some(&counter)).await;

    assert_eq!(counter.total(), 3);
    assert_eq!(failed, 1);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].origin, news_origin());
    assert_eq!(batches[0].records[0].source_name, "YourStory");
    // whitespace-only title removed during collection
    assert_eq!(batches[1].records.len(), 1);
}

#[tokio::test]
async fn job_batch_produces_announcement_lead() {
    let p = JsonFileProvider::from_fixture(news_origin(), JOBS_BATCH);
    let providers: Vec<Box<dyn SourceProvider>> = vec![Box::new(p)];
    let (batches, _) = collect_batches(&providers, None).await;

    let pipeline = LeadPipeline::new(LeadConfig::default_seed())
        .unwrap()
        .with_reference_year(2025);
    let report = pipeline.run(&batches);

    assert_eq!(report.leads.len(), 1, "rejected: {:?}", report.rejected);
    let lead = &report.leads[0];
    assert_eq!(lead.kind, LeadKind::JobAnnouncement);
    assert_eq!(lead.company, "Orbit Analytics");
    assert_eq!(lead.geo, "Hyderabad");
    assert!(lead.posting_freshness.as_ref().unwrap().is_recent);
}
