use t2i_core::EndpointsResponse;
use t2i_logging::{t2i_debug, t2i_info};

use crate::client::{map_reqwest_error, parse_url, read_body_capped};
use crate::{ClientError, ClientSettings, FailureKind};

pub const DEFAULT_DIRECTORY_URL: &str = "https://api.soulter.top/astrbot/t2i-endpoints";

/// Directory of public render endpoints.
#[async_trait::async_trait]
pub trait EndpointDirectory: Send + Sync {
    async fn fetch_endpoints(&self) -> Result<EndpointsResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDirectory {
    client: reqwest::Client,
    url: String,
    max_body_bytes: u64,
}

impl ReqwestDirectory {
    pub fn new(settings: &ClientSettings, url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            client: settings.build_client()?,
            url: url.into(),
            max_body_bytes: settings.max_body_bytes,
        })
    }
}

#[async_trait::async_trait]
impl EndpointDirectory for ReqwestDirectory {
    async fn fetch_endpoints(&self) -> Result<EndpointsResponse, ClientError> {
        let url = parse_url(&self.url)?;
        t2i_debug!("Fetching endpoint directory from {}", url);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                "failed to fetch endpoints",
            ));
        }

        let body = read_body_capped(response, self.max_body_bytes).await?;
        let directory: EndpointsResponse = serde_json::from_slice(&body)
            .map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))?;
        t2i_info!("Endpoint directory listed {} entries", directory.data.len());
        Ok(directory)
    }
}
