use std::time::Duration;

use t2i_core::{Effect, Msg};
use t2i_engine::{EngineEvent, EngineHandle};
use t2i_logging::{t2i_debug, t2i_error, t2i_info, t2i_warn};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchEndpoints => {
                    t2i_debug!("FetchEndpoints");
                    self.engine.fetch_endpoints();
                }
                Effect::FetchStarCount => {
                    t2i_debug!("FetchStarCount");
                    self.engine.fetch_star_count();
                }
                Effect::CancelStarCount => {
                    self.engine.cancel_star_count();
                }
                Effect::Generate {
                    request_id,
                    endpoint,
                    request,
                } => {
                    t2i_info!(
                        "Generate request_id={} endpoint={} tmpl_len={} type={}",
                        request_id,
                        endpoint,
                        request.tmpl.len(),
                        request.options.image_type.as_str()
                    );
                    self.engine.generate(request_id, endpoint, request);
                }
                // The terminal is the clipboard here.
                Effect::CopyToClipboard(text) => println!("{text}"),
            }
        }
    }

    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::EndpointsLoaded(Ok(response)) => Msg::EndpointsLoaded(Ok(response.data)),
        EngineEvent::EndpointsLoaded(Err(err)) => {
            t2i_error!("Failed to load endpoints: {}", err);
            Msg::EndpointsLoaded(Err(err.to_string()))
        }
        EngineEvent::StarCountLoaded(count) => Msg::StarCountLoaded(count),
        EngineEvent::GenerateCompleted { request_id, result } => Msg::GenerateFinished {
            request_id,
            result: result.map_err(|err| {
                t2i_warn!("Request {} failed: {}", request_id, err);
                err.detail()
            }),
        },
    }
}
