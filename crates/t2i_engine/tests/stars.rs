use std::time::Duration;

use serde_json::json;
use t2i_engine::{ClientSettings, ReqwestStarSource, StarSource};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn reads_stargazers_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/AstrBotDevs/AstrBot"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "AstrBotDevs/AstrBot",
            "stargazers_count": 12345
        })))
        .mount(&server)
        .await;

    let url = format!("{}/repos/AstrBotDevs/AstrBot", server.uri());
    let source = ReqwestStarSource::new(&ClientSettings::default(), url).unwrap();
    let count = source.star_count(&CancellationToken::new()).await;
    assert_eq!(count, Some(12345));
}

#[tokio::test]
async fn failures_are_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/odd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stargazers_count": "lots"
        })))
        .mount(&server)
        .await;

    for route in ["/limited", "/odd"] {
        let url = format!("{}{route}", server.uri());
        let source = ReqwestStarSource::new(&ClientSettings::default(), url).unwrap();
        assert_eq!(source.star_count(&CancellationToken::new()).await, None);
    }
}

#[tokio::test]
async fn cancelled_lookup_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "stargazers_count": 1 })),
        )
        .mount(&server)
        .await;

    let source = ReqwestStarSource::new(&ClientSettings::default(), server.uri()).unwrap();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    assert_eq!(source.star_count(&cancel).await, None);
    assert!(started.elapsed() < Duration::from_secs(2));
}
