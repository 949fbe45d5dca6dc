//! Scrape pipeline against a migrated database (`#[sqlx::test]`) and a
//! `wiremock` webhook.

use chrono::NaiveDate;
use cyberwatch_core::Article;
use cyberwatch_ingest::{persist_and_alert, WebhookNotifier};
use cyberwatch_relevance::parse_relevance_config;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article(n: u32, title: &str) -> Article {
    Article {
        source: "[CYBER] Test".to_string(),
        title: Some(title.to_string()),
        link: format!("https://feed.test/{n}"),
        published: NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
    }
}

fn batch() -> Vec<Article> {
    vec![
        article(1, "Ransomware hits Linux servers"),
        article(2, "Weather report"),
        article(3, "Critical exploit released"),
    ]
}

#[sqlx::test(migrations = "../../migrations")]
async fn only_new_articles_are_alerted(pool: sqlx::PgPool) {
    let relevance = parse_relevance_config(
        "lexicon:\n  critical: [ransomware, exploit]\n  context: [linux]\nalerts:\n  threshold: 2\n",
    )
    .expect("relevance config");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    let notifier = WebhookNotifier::new(&server.uri(), 2).expect("notifier");

    let first = persist_and_alert(&pool, batch(), &relevance, Some(&notifier)).await;
    assert_eq!(first.fetched, 3);
    assert_eq!(first.inserted, 3);
    assert_eq!(first.alerts, 2);
    assert_eq!(first.failed_inserts, 0);

    let second = persist_and_alert(&pool, batch(), &relevance, Some(&notifier)).await;
    assert_eq!(second.inserted, 0);
    assert_eq!(second.alerts, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn sink_outage_does_not_block_ingestion(pool: sqlx::PgPool) {
    let relevance =
        parse_relevance_config("lexicon:\n  critical: [ransomware]\nalerts:\n  threshold: 0\n")
            .expect("relevance config");
    let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook", 1).expect("notifier");

    let summary = persist_and_alert(&pool, batch(), &relevance, Some(&notifier)).await;
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.alerts, 3);
}
