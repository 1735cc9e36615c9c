use pretty_assertions::assert_eq;
use serde_json::json;
use t2i_core::{
    update, Effect, GenerateRequest, ImageFormat, ImageType, Msg, OptionChange, PlaygroundState,
    RenderedImage, RequestId,
};

fn with_endpoint(url: &str) -> PlaygroundState {
    let (state, _) = update(
        PlaygroundState::new(),
        Msg::CustomEndpointChanged(url.to_string()),
    );
    state
}

fn click_generate(state: PlaygroundState) -> (PlaygroundState, Option<(RequestId, GenerateRequest)>) {
    let (state, effects) = update(state, Msg::GenerateClicked);
    let generate = effects.into_iter().find_map(|effect| match effect {
        Effect::Generate {
            request_id,
            request,
            ..
        } => Some((request_id, request)),
        _ => None,
    });
    (state, generate)
}

fn png_image() -> RenderedImage {
    RenderedImage::new(b"\x89PNG\r\n\x1a\nrest".to_vec(), Some("image/png".into()))
}

#[test]
fn generate_builds_request_from_form() {
    let state = with_endpoint("https://host.example");
    let (state, _) = update(
        state,
        Msg::TemplateDataChanged(r#"{"title": "Hi", "items": [1, 2]}"#.to_string()),
    );
    let (state, effects) = update(state, Msg::GenerateClicked);

    assert_eq!(effects.len(), 1);
    let Effect::Generate {
        request_id,
        endpoint,
        request,
    } = &effects[0]
    else {
        panic!("expected generate effect, got {effects:?}");
    };
    assert_eq!(*request_id, 1);
    assert_eq!(endpoint, "https://host.example");
    assert_eq!(request.tmpldata, json!({ "title": "Hi", "items": [1, 2] }));
    assert_eq!(request.tmpl, t2i_core::DEFAULT_TEMPLATE);
    assert!(!request.json);
    assert_eq!(request.options.image_type, ImageType::Jpeg);
    assert_eq!(request.options.quality, Some(60));
    assert_eq!(request.options.timeout, None);

    let view = state.view();
    assert!(view.loading);
    assert!(view.busy);
    assert_eq!(view.error, None);
}

#[test]
fn timeout_seconds_are_sent_as_milliseconds() {
    let state = with_endpoint("https://host.example");
    let (state, _) = update(state, Msg::OptionsChanged(OptionChange::Timeout(Some(30))));
    let (_state, generate) = click_generate(state);

    let (_, request) = generate.expect("generate effect");
    assert_eq!(request.options.timeout, Some(30_000));
}

#[test]
fn omit_background_sends_png() {
    let state = with_endpoint("https://host.example");
    let (state, _) = update(
        state,
        Msg::OptionsChanged(OptionChange::OmitBackground(Some(true))),
    );
    let (_state, generate) = click_generate(state);

    let (_, request) = generate.expect("generate effect");
    assert_eq!(request.options.image_type, ImageType::Png);
    assert_eq!(request.options.omit_background, Some(true));
}

#[test]
fn option_changes_are_clamped_to_slider_bounds() {
    let (state, _) = update(
        PlaygroundState::new(),
        Msg::OptionsChanged(OptionChange::Quality(Some(0))),
    );
    let (state, _) = update(state, Msg::OptionsChanged(OptionChange::Timeout(Some(600))));
    let options = state.view().options;
    assert_eq!(options.quality, Some(1));
    assert_eq!(options.timeout, Some(120));
}

#[test]
fn missing_endpoint_is_reported_locally() {
    let (state, effects) = update(PlaygroundState::new(), Msg::GenerateClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("Select or enter an endpoint"));
    assert!(!view.loading);
}

#[test]
fn invalid_json_is_reported_without_request() {
    let state = with_endpoint("https://host.example");
    let (state, _) = update(state, Msg::TemplateDataChanged("{ not json".to_string()));
    let (state, effects) = update(state, Msg::GenerateClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view
        .error
        .as_deref()
        .unwrap()
        .starts_with("Template data is not valid JSON"));
    assert!(!view.loading);
}

#[test]
fn successful_render_stores_image() {
    let state = with_endpoint("https://host.example");
    let (state, generate) = click_generate(state);
    let (request_id, _) = generate.expect("generate effect");

    let (state, effects) = update(
        state,
        Msg::GenerateFinished {
            request_id,
            result: Ok(png_image()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.error, None);
    let image = view.image.expect("image summary");
    assert_eq!(image.format, ImageFormat::Png);
    assert_eq!(state.image().unwrap().bytes, png_image().bytes);
}

#[test]
fn service_error_body_is_surfaced_and_no_image_is_kept() {
    let state = with_endpoint("https://host.example");
    let (state, generate) = click_generate(state);
    let (request_id, _) = generate.expect("generate effect");

    let (state, _) = update(
        state,
        Msg::GenerateFinished {
            request_id,
            result: Err("template render error: 'title' is undefined".to_string()),
        },
    );
    let view = state.view();
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to generate image: template render error: 'title' is undefined")
    );
    assert_eq!(view.image, None);
    assert!(state.image().is_none());
    assert!(!view.loading);
}

#[test]
fn second_click_while_loading_is_ignored() {
    let state = with_endpoint("https://host.example");
    let (state, first) = click_generate(state);
    assert!(first.is_some());

    let (_state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
}

#[test]
fn stale_result_is_ignored() {
    let state = with_endpoint("https://host.example");
    let (state, generate) = click_generate(state);
    let (request_id, _) = generate.expect("generate effect");

    let (state, _) = update(
        state,
        Msg::GenerateFinished {
            request_id: request_id + 7,
            result: Ok(png_image()),
        },
    );
    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.image, None);
}

#[test]
fn ui_stays_usable_after_error() {
    let state = with_endpoint("https://host.example");
    let (state, generate) = click_generate(state);
    let (first_id, _) = generate.unwrap();
    let (state, _) = update(
        state,
        Msg::GenerateFinished {
            request_id: first_id,
            result: Err("boom".to_string()),
        },
    );

    let (state, generate) = click_generate(state);
    let (second_id, _) = generate.expect("resubmission allowed");
    assert_ne!(first_id, second_id);
    // The previous error is cleared on resubmission.
    assert_eq!(state.view().error, None);
}

#[test]
fn copy_options_emits_python_dict() {
    let (_state, effects) = update(PlaygroundState::new(), Msg::CopyOptionsClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard(
            "{\n    \"quality\": 60,\n    \"device_scale_factor_level\": \"normal\",\n    \"full_page\": True,\n    \"omit_background\": False,\n    \"type\": \"jpeg\"\n}"
                .to_string()
        )]
    );
}
