use std::time::Duration;

use company_scout::services::{ManualClock, PageScraper, PageSource, ScrapeError};
use url::Url;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::helpers::{mount_page, scraper_settings};

fn page_url(server: &MockServer, page_path: &str) -> Url {
    Url::parse(&server.uri()).unwrap().join(page_path).unwrap()
}

#[tokio::test]
async fn scrape_returns_main_text() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/about-us",
        "<nav>Home</nav><main><h1>About</h1><p>Founded 2010 by Jane Doe.</p></main>",
    )
    .await;
    let scraper = PageScraper::new(&scraper_settings(), ManualClock::new()).unwrap();

    let text = scraper.scrape(&page_url(&server, "/about-us")).await.unwrap();

    assert_eq!(text, "About Founded 2010 by Jane Doe.");
}

#[tokio::test]
async fn scrape_sends_page_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body>Our team</body>"))
        .expect(1)
        .mount(&server)
        .await;
    let scraper = PageScraper::new(&scraper_settings(), ManualClock::new()).unwrap();

    let text = scraper.scrape(&page_url(&server, "/team")).await.unwrap();

    assert_eq!(text, "Our team");
}

#[tokio::test]
async fn not_found_fails_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<body>Not here</body>"))
        .expect(1)
        .mount(&server)
        .await;
    let clock = ManualClock::new();
    let scraper = PageScraper::new(&scraper_settings(), clock.clone()).unwrap();

    let result = scraper.scrape(&page_url(&server, "/missing")).await;

    assert!(matches!(result, Err(ScrapeError::Status(404))));
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn server_errors_are_retried_with_backoff_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;
    let clock = ManualClock::new();
    let scraper = PageScraper::new(&scraper_settings(), clock.clone()).unwrap();

    let result = scraper.scrape(&page_url(&server, "/flaky")).await;

    match result {
        Err(ScrapeError::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 4);
            assert!(matches!(*last, ScrapeError::Status(503)));
        }
        other => panic!("expected exhausted retries, got {:?}", other),
    }
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(10), Duration::from_secs(20)]
    );
}

#[tokio::test]
async fn refused_connections_are_retried_until_exhausted() {
    let clock = ManualClock::new();
    let scraper = PageScraper::new(&scraper_settings(), clock.clone()).unwrap();

    // Nothing listens on port 9 locally
    let result = scraper.scrape(&Url::parse("http://127.0.0.1:9/").unwrap()).await;

    match result {
        Err(ScrapeError::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 4);
            assert!(matches!(*last, ScrapeError::Request(_)));
        }
        other => panic!("expected exhausted retries, got {:?}", other),
    }
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(10), Duration::from_secs(20)]
    );
}

#[tokio::test]
async fn recovers_after_transient_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/history", "<p>Since 1975</p>").await;
    let clock = ManualClock::new();
    let scraper = PageScraper::new(&scraper_settings(), clock.clone()).unwrap();

    let text = scraper.scrape(&page_url(&server, "/history")).await.unwrap();

    assert_eq!(text, "Since 1975");
    // the first retry goes out immediately
    assert!(clock.sleeps().is_empty());
}

#[tokio::test]
async fn unlisted_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(501))
        .expect(1)
        .mount(&server)
        .await;
    let clock = ManualClock::new();
    let scraper = PageScraper::new(&scraper_settings(), clock.clone()).unwrap();

    let result = scraper.scrape(&page_url(&server, "/broken")).await;

    assert!(matches!(result, Err(ScrapeError::Status(501))));
    assert!(clock.sleeps().is_empty());
}
