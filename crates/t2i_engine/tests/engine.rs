use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use t2i_core::{EndpointsResponse, GenerateRequest, RenderedImage, ScreenshotOptions};
use t2i_engine::{
    ClientError, ClientSettings, EndpointDirectory, EngineEvent, EngineHandle, EngineSettings,
    ReqwestRenderer, StarSource,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct FailingDirectory;

#[async_trait::async_trait]
impl EndpointDirectory for FailingDirectory {
    async fn fetch_endpoints(&self) -> Result<EndpointsResponse, ClientError> {
        Err(connection_refused())
    }
}

fn connection_refused() -> ClientError {
    ClientError {
        kind: t2i_engine::FailureKind::Network,
        message: "connection refused".to_string(),
    }
}

struct NeverStars;

#[async_trait::async_trait]
impl StarSource for NeverStars {
    async fn star_count(&self, cancel: &CancellationToken) -> Option<u64> {
        cancel.cancelled().await;
        None
    }
}

fn next_event(engine: &EngineHandle) -> Option<EngineEvent> {
    engine.recv_timeout(WAIT)
}

#[test]
fn engine_reports_directory_and_render_results() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dir"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "url": "https://a.example", "active": true }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/text2img/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg"),
            )
            .mount(&server)
            .await;
        server
    });

    let settings = EngineSettings {
        client: ClientSettings::default(),
        directory_url: format!("{}/dir", server.uri()),
        star_repo_url: format!("{}/stars", server.uri()),
    };
    let engine = EngineHandle::new(&settings).expect("engine starts");

    engine.fetch_endpoints();
    match next_event(&engine) {
        Some(EngineEvent::EndpointsLoaded(Ok(response))) => {
            assert_eq!(response.data.len(), 1);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let request = GenerateRequest::new("<p/>", json!({}), &ScreenshotOptions::default());
    engine.generate(9, server.uri(), request);
    match next_event(&engine) {
        Some(EngineEvent::GenerateCompleted { request_id, result }) => {
            assert_eq!(request_id, 9);
            let image: RenderedImage = result.expect("render ok");
            assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.shutdown();
}

#[test]
fn cancelled_star_lookup_emits_nothing() {
    let renderer = ReqwestRenderer::new(&ClientSettings::default()).unwrap();
    let engine = EngineHandle::with_services(
        Arc::new(FailingDirectory),
        Arc::new(renderer),
        Arc::new(NeverStars),
    )
    .expect("engine starts");

    engine.fetch_star_count();
    engine.cancel_star_count();
    engine.fetch_endpoints();

    // The directory failure arrives; the cancelled star lookup never does.
    match next_event(&engine) {
        Some(EngineEvent::EndpointsLoaded(Err(err))) => {
            assert_eq!(err.message, "connection refused");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(engine.recv_timeout(Duration::from_millis(200)).is_none());
    engine.shutdown();
}
