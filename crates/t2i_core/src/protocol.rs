//! Wire types shared with the render service and the endpoint directory.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Valid screenshot quality values.
pub const QUALITY_RANGE: RangeInclusive<u8> = 1..=100;
/// Timeout bounds offered to the user, in seconds.
pub const TIMEOUT_SECS_RANGE: RangeInclusive<u32> = 5..=120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointsResponse {
    #[serde(default)]
    pub data: Vec<Endpoint>,
}

impl EndpointsResponse {
    /// Active endpoints in directory order.
    pub fn into_active(self) -> Vec<Endpoint> {
        self.data.into_iter().filter(|ep| ep.active).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleLevel {
    #[default]
    Normal,
    High,
    Ultra,
}

impl ScaleLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleLevel::Normal => "normal",
            ScaleLevel::High => "high",
            ScaleLevel::Ultra => "ultra",
        }
    }

    /// Nominal device pixel ratio the service applies for this level.
    pub fn ratio(self) -> f32 {
        match self {
            ScaleLevel::Normal => 1.0,
            ScaleLevel::High => 1.3,
            ScaleLevel::Ultra => 1.8,
        }
    }
}

impl fmt::Display for ScaleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ScaleLevel::Normal),
            "high" => Ok(ScaleLevel::High),
            "ultra" => Ok(ScaleLevel::Ultra),
            other => Err(format!(
                "unknown scale level '{other}' (expected normal, high or ultra)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Png,
    Jpeg,
}

impl ImageType {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpeg => "jpeg",
        }
    }
}

/// Screenshot options as edited by the user. `timeout` is in seconds.
///
/// Every field is optional; `None` leaves the choice to the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotOptions {
    pub quality: Option<u8>,
    pub timeout: Option<u32>,
    pub full_page: Option<bool>,
    pub device_scale_factor_level: Option<ScaleLevel>,
    pub omit_background: Option<bool>,
}

impl ScreenshotOptions {
    /// Options a fresh session starts with.
    pub fn playground_defaults() -> Self {
        Self {
            quality: Some(60),
            timeout: None,
            full_page: Some(true),
            device_scale_factor_level: Some(ScaleLevel::Normal),
            omit_background: Some(false),
        }
    }

    /// A transparent background needs an alpha channel, so it forces PNG.
    pub fn image_type(&self) -> ImageType {
        if self.omit_background == Some(true) {
            ImageType::Png
        } else {
            ImageType::Jpeg
        }
    }

    pub fn timeout_millis(&self) -> Option<u64> {
        self.timeout.map(|secs| u64::from(secs) * 1000)
    }

    pub fn to_request_options(&self) -> RequestOptions {
        RequestOptions {
            quality: self.quality,
            timeout: self.timeout_millis(),
            full_page: self.full_page,
            device_scale_factor_level: self.device_scale_factor_level,
            omit_background: self.omit_background,
            image_type: self.image_type(),
        }
    }
}

/// Options as transmitted. `timeout` is in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_scale_factor_level: Option<ScaleLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_background: Option<bool>,
    #[serde(rename = "type")]
    pub image_type: ImageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub tmpl: String,
    pub tmpldata: Value,
    pub options: RequestOptions,
    /// Asks the service for a JSON envelope instead of raw image bytes.
    pub json: bool,
}

impl GenerateRequest {
    pub fn new(template: impl Into<String>, data: Value, options: &ScreenshotOptions) -> Self {
        Self {
            tmpl: template.into(),
            tmpldata: data,
            options: options.to_request_options(),
            json: false,
        }
    }
}
