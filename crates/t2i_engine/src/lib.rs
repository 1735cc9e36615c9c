//! Playground engine: HTTP clients, preset loading and effect execution.
mod client;
mod directory;
mod engine;
mod persist;
mod presets;
mod render;
mod stars;
mod types;

pub use client::ClientSettings;
pub use directory::{EndpointDirectory, ReqwestDirectory, DEFAULT_DIRECTORY_URL};
pub use engine::{EngineHandle, EngineSettings};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use presets::load_presets;
pub use render::{normalize_endpoint_url, Renderer, ReqwestRenderer};
pub use stars::{ReqwestStarSource, StarSource, DEFAULT_STAR_REPO_URL};
pub use types::{ClientError, EngineError, EngineEvent, FailureKind, RequestId};
