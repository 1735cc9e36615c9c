use crate::view_model::{ImageSummary, PlaygroundViewModel, PresetCard};
use crate::{format_star_count, Endpoint, Preset, RenderedImage, ScreenshotOptions};

pub type RequestId = u64;

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    body {
      font-family: Arial, sans-serif;
      padding: 20px;
      background: #f5f5f5;
    }
    .container {
      background: white;
      padding: 20px;
      border-radius: 8px;
      box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
      color: #333;
    }
  </style>
</head>
<body>
  <div class="container">
    <h1>{{ title }}</h1>
    <p>{{ content }}</p>
  </div>
</body>
</html>"#;

pub const DEFAULT_TEMPLATE_DATA: &str = r#"{
  "title": "Hello World",
  "content": "This is a test template"
}"#;

const PRESET_HINT: &str = "Click to apply this preset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundState {
    pub(crate) template: String,
    pub(crate) template_data: String,
    pub(crate) options: ScreenshotOptions,
    pub(crate) endpoints: Vec<Endpoint>,
    pub(crate) selected_endpoint: String,
    pub(crate) custom_endpoint: String,
    pub(crate) presets: Vec<Preset>,
    pub(crate) pending_preset: Option<String>,
    pub(crate) in_flight: Option<RequestId>,
    pub(crate) next_request_id: RequestId,
    pub(crate) image: Option<RenderedImage>,
    pub(crate) error: Option<String>,
    pub(crate) notice: Option<String>,
    pub(crate) star_count: Option<u64>,
    pub(crate) endpoints_loading: bool,
    pub(crate) stars_loading: bool,
    dirty: bool,
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaygroundState {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            template_data: DEFAULT_TEMPLATE_DATA.to_string(),
            options: ScreenshotOptions::playground_defaults(),
            endpoints: Vec::new(),
            selected_endpoint: String::new(),
            custom_endpoint: String::new(),
            presets: Vec::new(),
            pending_preset: None,
            in_flight: None,
            next_request_id: 1,
            image: None,
            error: None,
            notice: None,
            star_count: None,
            endpoints_loading: false,
            stars_loading: false,
            dirty: false,
        }
    }

    pub fn with_presets(mut self, presets: Vec<Preset>) -> Self {
        self.presets = presets;
        self
    }

    pub fn view(&self) -> PlaygroundViewModel {
        PlaygroundViewModel {
            template: self.template.clone(),
            template_data: self.template_data.clone(),
            options: self.options.clone(),
            endpoints: self.endpoints.iter().map(|ep| ep.url.clone()).collect(),
            selected_endpoint: non_blank(&self.selected_endpoint),
            custom_endpoint: non_blank(&self.custom_endpoint),
            effective_endpoint: self.effective_endpoint().map(str::to_owned),
            presets: self.presets.iter().map(preset_card).collect(),
            pending_preset: self.pending_preset.clone(),
            endpoints_loading: self.endpoints_loading,
            loading: self.in_flight.is_some(),
            busy: self.is_busy(),
            image: self.image.as_ref().map(|image| ImageSummary {
                format: image.format,
                byte_len: image.len(),
            }),
            error: self.error.clone(),
            notice: self.notice.clone(),
            star_badge: self.star_count.map(format_star_count),
            dirty: self.dirty,
        }
    }

    /// Bytes of the last successful render, if any.
    pub fn image(&self) -> Option<&RenderedImage> {
        self.image.as_ref()
    }

    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// Any outbound request still pending.
    pub fn is_busy(&self) -> bool {
        self.endpoints_loading || self.stars_loading || self.in_flight.is_some()
    }

    /// Custom input wins over the directory selection.
    pub(crate) fn effective_endpoint(&self) -> Option<&str> {
        let custom = self.custom_endpoint.trim();
        if !custom.is_empty() {
            return Some(custom);
        }
        let selected = self.selected_endpoint.trim();
        (!selected.is_empty()).then_some(selected)
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn preset_card(preset: &Preset) -> PresetCard {
    PresetCard {
        id: preset.id.clone(),
        name: preset.meta.preset_name.clone(),
        description: preset
            .meta
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| PRESET_HINT.to_string()),
        author: preset.meta.author.clone(),
        has_preview: preset.preview.is_some(),
    }
}
