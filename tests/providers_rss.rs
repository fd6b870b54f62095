// tests/providers_rss.rs
use lead_radar::ingest::collect_batches;
use lead_radar::ingest::providers::NewsRssProvider;
use lead_radar::{BatchOrigin, LeadConfig, LeadPipeline, SignalCategory, SourceProvider};

fn fixture() -> String {
    std::fs::read_to_string("tests/fixtures/news_rss.xml").expect("fixture")
}

#[tokio::test]
async fn parses_items_and_strips_publisher_suffix() {
    let p = NewsRssProvider::from_fixture(SignalCategory::Funding, &fixture());
    let batch = p.fetch_batch().await.unwrap();

    assert_eq!(
        batch.origin,
        BatchOrigin::News {
            query: SignalCategory::Funding
        }
    );
    // the empty-title item is skipped
    assert_eq!(batch.records.len(), 2);

    let first = &batch.records[0];
    assert_eq!(first.title, "TechCorp Pvt raises ₹5,00,000 in Bengaluru");
    assert_eq!(first.source_name, "Inc42");
    assert_eq!(first.published_at, "2025-06-10T06:30:00Z");
    assert_eq!(first.link, "https://inc42.com/buzz/techcorp-funding/");

    // no <source>: falls back to the channel title
    assert_eq!(batch.records[1].source_name, "\"funding\" - Google News");
}

#[tokio::test]
async fn collected_rss_flows_through_the_pipeline() {
    let providers: Vec<Box<dyn SourceProvider>> = vec![Box::new(NewsRssProvider::from_fixture(
        SignalCategory::Funding,
        &fixture(),
    ))];
    let (batches, failed) = collect_batches(&providers, None).await;
    assert_eq!(failed, 0);
    assert_eq!(batches[0].records[0].snippet, "Funding for expansion in India");

    let pipeline = LeadPipeline::new(LeadConfig::default_seed()).unwrap();
    let report = pipeline.run(&batches);
    let companies: Vec<_> = report.leads.iter().map(|l| l.company.as_str()).collect();
    assert!(companies.contains(&"TechCorp"), "{companies:?}");
    assert!(companies.contains(&"Acme Robotics"), "{companies:?}");
}

#[tokio::test]
async fn malformed_xml_is_an_error() {
    let p = NewsRssProvider::from_fixture(SignalCategory::Funding, "<rss><channel><item>");
    assert!(p.fetch_batch().await.is_err());
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let p = NewsRssProvider::from_path(SignalCategory::Expansion, "tests/fixtures/nope.xml");
    assert!(p.fetch_batch().await.is_err());
}
