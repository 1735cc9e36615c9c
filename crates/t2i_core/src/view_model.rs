use crate::{ImageFormat, ScreenshotOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundViewModel {
    pub template: String,
    pub template_data: String,
    pub options: ScreenshotOptions,
    pub endpoints: Vec<String>,
    pub selected_endpoint: Option<String>,
    pub custom_endpoint: Option<String>,
    /// Endpoint a Generate click would use right now.
    pub effective_endpoint: Option<String>,
    pub presets: Vec<PresetCard>,
    /// Preset waiting for overwrite confirmation.
    pub pending_preset: Option<String>,
    pub endpoints_loading: bool,
    /// A render request is in flight.
    pub loading: bool,
    pub busy: bool,
    pub image: Option<ImageSummary>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub star_badge: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub has_preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSummary {
    pub format: ImageFormat,
    pub byte_len: usize,
}
