use serde_json::json;
use t2i_core::{update, Msg, PlaygroundState, Preset, PresetMeta};

fn preset(id: &str, description: Option<&str>) -> Preset {
    let mut meta = PresetMeta::named(format!("Preset {id}"));
    meta.description = description.map(str::to_owned);
    meta.tmpldata = Some(json!({ "name": id }));
    Preset {
        id: id.to_string(),
        template: format!("<p>{id}: {{{{ name }}}}</p>"),
        meta,
        preview: None,
    }
}

fn state_with_presets() -> PlaygroundState {
    PlaygroundState::new().with_presets(vec![preset("card", Some("A card")), preset("list", None)])
}

#[test]
fn gallery_cards_fall_back_to_hint() {
    let view = state_with_presets().view();
    assert_eq!(view.presets.len(), 2);
    assert_eq!(view.presets[0].description, "A card");
    assert_eq!(view.presets[1].description, "Click to apply this preset");
    assert_eq!(view.presets[1].name, "Preset list");
}

#[test]
fn preset_over_existing_template_needs_confirmation() {
    let (state, effects) = update(state_with_presets(), Msg::PresetClicked("card".into()));
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.pending_preset.as_deref(), Some("card"));
    assert_eq!(view.template, t2i_core::DEFAULT_TEMPLATE);

    let (state, _) = update(state, Msg::PresetConfirmed);
    let view = state.view();
    assert_eq!(view.pending_preset, None);
    assert_eq!(view.template, "<p>card: {{ name }}</p>");
    assert_eq!(view.template_data, "{\n  \"name\": \"card\"\n}");
    assert_eq!(view.notice.as_deref(), Some("Preset imported"));
}

#[test]
fn cancel_keeps_editor_untouched() {
    let (state, _) = update(state_with_presets(), Msg::PresetClicked("list".into()));
    let (state, _) = update(state, Msg::PresetCancelled);
    let view = state.view();
    assert_eq!(view.pending_preset, None);
    assert_eq!(view.template, t2i_core::DEFAULT_TEMPLATE);
    assert_eq!(view.template_data, t2i_core::DEFAULT_TEMPLATE_DATA);
    assert_eq!(view.notice, None);
}

#[test]
fn preset_on_blank_template_applies_immediately() {
    let (state, _) = update(state_with_presets(), Msg::TemplateChanged("  \n".into()));
    let (state, _) = update(state, Msg::PresetClicked("list".into()));
    let view = state.view();
    assert_eq!(view.pending_preset, None);
    assert_eq!(view.template, "<p>list: {{ name }}</p>");

    let (state, _) = update(state, Msg::NoticeDismissed);
    assert_eq!(state.view().notice, None);
}

#[test]
fn unknown_preset_sets_error() {
    let (state, _) = update(state_with_presets(), Msg::PresetClicked("missing".into()));
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("Unknown preset 'missing'"));
    assert_eq!(view.pending_preset, None);
}
