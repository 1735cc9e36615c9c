use crate::{Endpoint, RenderedImage, RequestId, ScaleLevel, ScreenshotOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session opened; kicks off the directory and star lookups.
    Started,
    /// User asked to reload the endpoint directory.
    EndpointsRequested,
    /// Directory lookup finished. The list is unfiltered.
    EndpointsLoaded(Result<Vec<Endpoint>, String>),
    /// User picked an endpoint from the directory list.
    EndpointSelected(String),
    /// User edited the custom endpoint box.
    CustomEndpointChanged(String),
    /// User edited the template editor.
    TemplateChanged(String),
    /// User edited the template data editor.
    TemplateDataChanged(String),
    /// User changed a single screenshot option.
    OptionsChanged(OptionChange),
    /// Replace all options at once, e.g. from configuration.
    OptionsReplaced(ScreenshotOptions),
    /// User clicked Generate.
    GenerateClicked,
    /// Render service answered.
    GenerateFinished {
        request_id: RequestId,
        result: Result<RenderedImage, String>,
    },
    /// User picked a preset from the gallery.
    PresetClicked(String),
    /// User confirmed overwriting the editor with the pending preset.
    PresetConfirmed,
    /// User backed out of applying the pending preset.
    PresetCancelled,
    /// Star lookup finished; `None` when it failed or was cancelled.
    StarCountLoaded(Option<u64>),
    /// User clicked "copy options".
    CopyOptionsClicked,
    /// Toast closed.
    NoticeDismissed,
    /// Front end is going away.
    Shutdown,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionChange {
    Quality(Option<u8>),
    Timeout(Option<u32>),
    FullPage(Option<bool>),
    ScaleLevel(Option<ScaleLevel>),
    OmitBackground(Option<bool>),
}
