use reqwest::header::CONTENT_TYPE;
use t2i_core::{GenerateRequest, RenderedImage};
use t2i_logging::{t2i_debug, t2i_info, t2i_warn};

use crate::client::{map_reqwest_error, parse_url, read_body_capped};
use crate::{ClientError, ClientSettings, FailureKind};

const GENERATE_SUFFIX: &str = "/generate";
const SERVICE_SUFFIX: &str = "/text2img";

/// Turn user input into the concrete render path.
///
/// Accepts a full `/text2img/generate` URL, the documented `/text2img` service
/// root, or a bare host.
pub fn normalize_endpoint_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    let url = trimmed.strip_suffix('/').unwrap_or(trimmed);

    if url.ends_with(GENERATE_SUFFIX) {
        url.to_string()
    } else if url.ends_with(SERVICE_SUFFIX) {
        format!("{url}{GENERATE_SUFFIX}")
    } else {
        format!("{url}{SERVICE_SUFFIX}{GENERATE_SUFFIX}")
    }
}

#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    async fn generate(
        &self,
        endpoint: &str,
        request: &GenerateRequest,
    ) -> Result<RenderedImage, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRenderer {
    client: reqwest::Client,
    max_image_bytes: u64,
}

impl ReqwestRenderer {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        Ok(Self {
            client: settings.build_client()?,
            max_image_bytes: settings.max_body_bytes,
        })
    }
}

#[async_trait::async_trait]
impl Renderer for ReqwestRenderer {
    async fn generate(
        &self,
        endpoint: &str,
        request: &GenerateRequest,
    ) -> Result<RenderedImage, ClientError> {
        let url = parse_url(&normalize_endpoint_url(endpoint))?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))?;
        t2i_debug!("POST {} ({} byte body)", url, body.len());

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            t2i_warn!("Render at {} rejected with {}: {}", url, status, text);
            let message = if text.trim().is_empty() {
                status.to_string()
            } else {
                text
            };
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = read_body_capped(response, self.max_image_bytes).await?;
        let image = RenderedImage::new(bytes, content_type);
        t2i_info!(
            "Rendered {} bytes ({:?}) from {}",
            image.len(),
            image.format,
            url
        );
        Ok(image)
    }
}
