//! Playground core: pure state machine, wire types and view-model helpers.
mod effect;
mod export;
mod image;
mod msg;
mod preset;
mod protocol;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use export::{format_star_count, python_dict};
pub use image::{ImageFormat, RenderedImage};
pub use msg::{Msg, OptionChange};
pub use preset::{Preset, PresetMeta, EXCLUDED_PRESET_ID};
pub use protocol::{
    Endpoint, EndpointsResponse, GenerateRequest, ImageType, RequestOptions, ScaleLevel,
    ScreenshotOptions, QUALITY_RANGE, TIMEOUT_SECS_RANGE,
};
pub use state::{PlaygroundState, RequestId, DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_DATA};
pub use update::update;
pub use view_model::{ImageSummary, PlaygroundViewModel, PresetCard};
