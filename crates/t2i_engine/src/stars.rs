use serde::Deserialize;
use t2i_logging::t2i_debug;
use tokio_util::sync::CancellationToken;

use crate::client::{parse_url, read_body_capped};
use crate::{ClientError, ClientSettings};

pub const DEFAULT_STAR_REPO_URL: &str = "https://api.github.com/repos/AstrBotDevs/AstrBot";

// Repository metadata is small; anything larger is not what we asked for.
const MAX_METADATA_BYTES: u64 = 1024 * 1024;

/// Best-effort repository star lookup for the header badge.
#[async_trait::async_trait]
pub trait StarSource: Send + Sync {
    /// `None` on any failure or when `cancel` fires first.
    async fn star_count(&self, cancel: &CancellationToken) -> Option<u64>;
}

#[derive(Debug, Deserialize)]
struct RepoMetadata {
    stargazers_count: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ReqwestStarSource {
    client: reqwest::Client,
    repo_url: String,
}

impl ReqwestStarSource {
    pub fn new(settings: &ClientSettings, repo_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            client: settings.build_client()?,
            repo_url: repo_url.into(),
        })
    }

    async fn lookup(&self) -> Option<u64> {
        let url = parse_url(&self.repo_url).ok()?;
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                t2i_debug!("Star lookup failed: {}", err);
                return None;
            }
        };
        if !response.status().is_success() {
            t2i_debug!("Star lookup returned {}", response.status());
            return None;
        }
        let body = read_body_capped(response, MAX_METADATA_BYTES).await.ok()?;
        let metadata: RepoMetadata = serde_json::from_slice(&body).ok()?;
        metadata.stargazers_count.as_ref().and_then(|v| v.as_u64())
    }
}

#[async_trait::async_trait]
impl StarSource for ReqwestStarSource {
    async fn star_count(&self, cancel: &CancellationToken) -> Option<u64> {
        tokio::select! {
            _ = cancel.cancelled() => {
                t2i_debug!("Star lookup cancelled");
                None
            }
            count = self.lookup() => count,
        }
    }
}
