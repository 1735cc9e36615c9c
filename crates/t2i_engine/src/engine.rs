use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use t2i_core::GenerateRequest;
use t2i_logging::{t2i_debug, t2i_info};
use tokio_util::sync::CancellationToken;

use crate::directory::{EndpointDirectory, ReqwestDirectory, DEFAULT_DIRECTORY_URL};
use crate::render::{Renderer, ReqwestRenderer};
use crate::stars::{ReqwestStarSource, StarSource, DEFAULT_STAR_REPO_URL};
use crate::{ClientSettings, EngineError, EngineEvent, RequestId};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub client: ClientSettings,
    pub directory_url: String,
    pub star_repo_url: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            client: ClientSettings::default(),
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            star_repo_url: DEFAULT_STAR_REPO_URL.to_string(),
        }
    }
}

enum EngineCommand {
    FetchEndpoints,
    FetchStarCount,
    CancelStarCount,
    Generate {
        request_id: RequestId,
        endpoint: String,
        request: Box<GenerateRequest>,
    },
    Shutdown,
}

struct Services {
    directory: Arc<dyn EndpointDirectory>,
    renderer: Arc<dyn Renderer>,
    stars: Arc<dyn StarSource>,
}

/// Runs outbound requests on a background tokio runtime and reports results
/// as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        let directory = ReqwestDirectory::new(&settings.client, settings.directory_url.clone())?;
        let renderer = ReqwestRenderer::new(&settings.client)?;
        let stars = ReqwestStarSource::new(&settings.client, settings.star_repo_url.clone())?;
        Self::with_services(Arc::new(directory), Arc::new(renderer), Arc::new(stars))
    }

    /// Start the engine over caller-supplied clients.
    pub fn with_services(
        directory: Arc<dyn EndpointDirectory>,
        renderer: Arc<dyn Renderer>,
        stars: Arc<dyn StarSource>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let services = Services {
            directory,
            renderer,
            stars,
        };

        thread::Builder::new()
            .name("t2i-engine".to_string())
            .spawn(move || {
                run_loop(&runtime, &services, cmd_rx, event_tx);
                runtime.shutdown_timeout(Duration::from_millis(500));
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_endpoints(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchEndpoints);
    }

    pub fn fetch_star_count(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchStarCount);
    }

    pub fn cancel_star_count(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelStarCount);
    }

    pub fn generate(&self, request_id: RequestId, endpoint: impl Into<String>, request: GenerateRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            request_id,
            endpoint: endpoint.into(),
            request: Box::new(request),
        });
    }

    /// Cancels the star lookup and stops the worker thread.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_loop(
    runtime: &tokio::runtime::Runtime,
    services: &Services,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut star_cancel: Option<CancellationToken> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::FetchEndpoints => {
                let directory = services.directory.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = directory.fetch_endpoints().await;
                    let _ = event_tx.send(EngineEvent::EndpointsLoaded(result));
                });
            }
            EngineCommand::FetchStarCount => {
                if let Some(previous) = star_cancel.take() {
                    previous.cancel();
                }
                let token = CancellationToken::new();
                star_cancel = Some(token.clone());
                let stars = services.stars.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let count = stars.star_count(&token).await;
                    // Nobody is listening for a cancelled lookup.
                    if !token.is_cancelled() {
                        let _ = event_tx.send(EngineEvent::StarCountLoaded(count));
                    }
                });
            }
            EngineCommand::CancelStarCount => {
                if let Some(token) = star_cancel.take() {
                    t2i_debug!("Cancelling star lookup");
                    token.cancel();
                }
            }
            EngineCommand::Generate {
                request_id,
                endpoint,
                request,
            } => {
                let renderer = services.renderer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = renderer.generate(&endpoint, &request).await;
                    let _ = event_tx.send(EngineEvent::GenerateCompleted { request_id, result });
                });
            }
            EngineCommand::Shutdown => {
                if let Some(token) = star_cancel.take() {
                    token.cancel();
                }
                t2i_info!("Engine shutting down");
                break;
            }
        }
    }
}
