use crate::{
    Effect, GenerateRequest, Msg, OptionChange, PlaygroundState, ScreenshotOptions, QUALITY_RANGE,
    TIMEOUT_SECS_RANGE,
};

const NO_ENDPOINT: &str = "Select or enter an endpoint";
const PRESET_IMPORTED: &str = "Preset imported";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PlaygroundState, msg: Msg) -> (PlaygroundState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.endpoints_loading = true;
            state.stars_loading = true;
            state.mark_dirty();
            vec![Effect::FetchEndpoints, Effect::FetchStarCount]
        }
        Msg::EndpointsRequested => {
            if state.endpoints_loading {
                return (state, Vec::new());
            }
            state.endpoints_loading = true;
            state.mark_dirty();
            vec![Effect::FetchEndpoints]
        }
        Msg::EndpointsLoaded(result) => {
            state.endpoints_loading = false;
            // A failed directory lookup leaves the list empty; the user can
            // still type a custom endpoint.
            state.endpoints = match result {
                Ok(all) => all.into_iter().filter(|ep| ep.active).collect(),
                Err(_) => Vec::new(),
            };
            if state.selected_endpoint.trim().is_empty() {
                if let Some(first) = state.endpoints.first() {
                    state.selected_endpoint = first.url.clone();
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::EndpointSelected(url) => {
            state.selected_endpoint = url;
            state.mark_dirty();
            Vec::new()
        }
        Msg::CustomEndpointChanged(text) => {
            state.custom_endpoint = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::TemplateChanged(text) => {
            state.template = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::TemplateDataChanged(text) => {
            state.template_data = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::OptionsChanged(change) => {
            apply_option_change(&mut state.options, change);
            state.mark_dirty();
            Vec::new()
        }
        Msg::OptionsReplaced(mut options) => {
            options.quality = options.quality.map(clamp_quality);
            options.timeout = options.timeout.map(clamp_timeout);
            state.options = options;
            state.mark_dirty();
            Vec::new()
        }
        Msg::GenerateClicked => {
            if state.in_flight.is_some() {
                return (state, Vec::new());
            }
            state.error = None;
            state.image = None;
            state.mark_dirty();
            match build_request(&state) {
                Ok((endpoint, request)) => {
                    let request_id = state.allocate_request_id();
                    state.in_flight = Some(request_id);
                    vec![Effect::Generate {
                        request_id,
                        endpoint,
                        request,
                    }]
                }
                Err(message) => {
                    state.error = Some(message);
                    Vec::new()
                }
            }
        }
        Msg::GenerateFinished { request_id, result } => {
            if state.in_flight != Some(request_id) {
                return (state, Vec::new());
            }
            state.in_flight = None;
            match result {
                Ok(image) => state.image = Some(image),
                Err(detail) => state.error = Some(format!("Failed to generate image: {detail}")),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::PresetClicked(id) => {
            if state.preset(&id).is_none() {
                state.error = Some(format!("Unknown preset '{id}'"));
            } else if state.template.trim().is_empty() {
                apply_preset(&mut state, &id);
            } else {
                state.pending_preset = Some(id);
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::PresetConfirmed => {
            if let Some(id) = state.pending_preset.take() {
                apply_preset(&mut state, &id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PresetCancelled => {
            if state.pending_preset.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StarCountLoaded(count) => {
            state.stars_loading = false;
            if count.is_some() {
                state.star_count = count;
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::CopyOptionsClicked => vec![Effect::CopyToClipboard(crate::python_dict(
            &state.options,
        ))],
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Shutdown => {
            if state.stars_loading {
                state.stars_loading = false;
                state.mark_dirty();
                vec![Effect::CancelStarCount]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn build_request(state: &PlaygroundState) -> Result<(String, GenerateRequest), String> {
    let endpoint = state
        .effective_endpoint()
        .ok_or_else(|| NO_ENDPOINT.to_string())?
        .to_string();
    let data: serde_json::Value = serde_json::from_str(&state.template_data)
        .map_err(|err| format!("Template data is not valid JSON: {err}"))?;
    let request = GenerateRequest::new(state.template.clone(), data, &state.options);
    Ok((endpoint, request))
}

fn apply_preset(state: &mut PlaygroundState, id: &str) {
    let Some(preset) = state.preset(id) else {
        return;
    };
    let template = preset.template.clone();
    let data = preset.data_text();
    state.template = template;
    state.template_data = data;
    state.notice = Some(PRESET_IMPORTED.to_string());
}

fn apply_option_change(options: &mut ScreenshotOptions, change: OptionChange) {
    match change {
        OptionChange::Quality(value) => options.quality = value.map(clamp_quality),
        OptionChange::Timeout(value) => options.timeout = value.map(clamp_timeout),
        OptionChange::FullPage(value) => options.full_page = value,
        OptionChange::ScaleLevel(value) => options.device_scale_factor_level = value,
        OptionChange::OmitBackground(value) => options.omit_background = value,
    }
}

fn clamp_quality(value: u8) -> u8 {
    value.clamp(*QUALITY_RANGE.start(), *QUALITY_RANGE.end())
}

fn clamp_timeout(value: u32) -> u32 {
    value.clamp(*TIMEOUT_SECS_RANGE.start(), *TIMEOUT_SECS_RANGE.end())
}
