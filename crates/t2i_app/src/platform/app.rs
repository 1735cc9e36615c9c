use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use t2i_core::{update, Msg, PlaygroundState, PlaygroundViewModel};
use t2i_engine::{load_presets, EngineHandle};
use t2i_logging::{level_for_verbosity, t2i_debug, t2i_info, t2i_warn};

use super::config::PlaygroundConfig;
use super::effects::EffectRunner;
use super::{logging, output, ui};
use crate::cli::{Cli, Command, OptionArgs, RenderArgs};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = PlaygroundConfig::load(cli.config.as_deref())?;
    logging::initialize(cli.log_to, level_for_verbosity(cli.verbose), &config.log_file);

    match cli.command {
        Command::Endpoints => run_endpoints(&config),
        Command::Presets => run_presets(&config),
        Command::Options(args) => run_options(&config, &args),
        Command::Render(args) => run_render(&config, &args),
    }
}

/// One playground session: core state plus the engine that serves its effects.
pub struct Session {
    state: PlaygroundState,
    runner: EffectRunner,
}

impl Session {
    pub fn start(state: PlaygroundState, config: &PlaygroundConfig) -> anyhow::Result<Self> {
        let engine =
            EngineHandle::new(&config.engine_settings()).context("failed to start engine")?;
        Ok(Self {
            state,
            runner: EffectRunner::new(engine),
        })
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            t2i_debug!("{}", ui::render::status_line(&state.view()));
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Feed engine events into the core until `done` holds or `deadline`
    /// passes. Returns whether `done` was reached.
    pub fn pump_until(
        &mut self,
        done: impl Fn(&PlaygroundViewModel) -> bool,
        deadline: Duration,
    ) -> bool {
        let started = Instant::now();
        loop {
            if done(&self.state.view()) {
                return true;
            }
            if started.elapsed() >= deadline {
                t2i_warn!("Gave up waiting after {:?}", deadline);
                return false;
            }
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
    }

    pub fn state(&self) -> &PlaygroundState {
        &self.state
    }

    pub fn view(&self) -> PlaygroundViewModel {
        self.state.view()
    }

    /// Cancels background lookups and stops the engine.
    pub fn close(mut self) {
        self.dispatch(Msg::Shutdown);
        self.runner.shutdown();
    }
}

fn run_endpoints(config: &PlaygroundConfig) -> anyhow::Result<()> {
    let mut session = Session::start(PlaygroundState::new(), config)?;
    session.dispatch(Msg::EndpointsRequested);
    session.pump_until(|view| !view.endpoints_loading, config.settle_deadline());

    for line in ui::render::endpoint_lines(&session.view()) {
        println!("{line}");
    }
    session.close();
    Ok(())
}

fn run_presets(config: &PlaygroundConfig) -> anyhow::Result<()> {
    let state = PlaygroundState::new().with_presets(load_presets(&config.presets_dir));
    for line in ui::render::preset_lines(&state.view()) {
        println!("{line}");
    }
    Ok(())
}

fn run_options(config: &PlaygroundConfig, args: &OptionArgs) -> anyhow::Result<()> {
    let mut state = PlaygroundState::new();
    let mut msgs = vec![Msg::OptionsReplaced(config.default_options.clone())];
    msgs.extend(args.changes().into_iter().map(Msg::OptionsChanged));
    msgs.push(Msg::CopyOptionsClicked);

    for msg in msgs {
        let (next, effects) = update(state, msg);
        state = next;
        for effect in effects {
            if let t2i_core::Effect::CopyToClipboard(text) = effect {
                println!("{text}");
            }
        }
    }
    Ok(())
}

fn run_render(config: &PlaygroundConfig, args: &RenderArgs) -> anyhow::Result<()> {
    let state = PlaygroundState::new().with_presets(load_presets(&config.presets_dir));
    let mut session = Session::start(state, config)?;

    for msg in form_messages(config, args)? {
        session.dispatch(msg);
        if let Some(error) = session.view().error {
            session.close();
            bail!(error);
        }
        // Naming a preset on the command line is the confirmation.
        if session.view().pending_preset.is_some() {
            session.dispatch(Msg::PresetConfirmed);
        }
    }

    session.dispatch(Msg::Started);
    if session.view().effective_endpoint.is_none() {
        session.pump_until(|view| !view.endpoints_loading, config.settle_deadline());
    }

    session.dispatch(Msg::GenerateClicked);
    session.pump_until(|view| !view.loading, config.settle_deadline());

    let view = session.view();
    eprintln!("{}", ui::render::header(&view));
    let result = match (view.error, session.state().image()) {
        (Some(error), _) => Err(anyhow::anyhow!(error)),
        (None, Some(image)) => output::write_image(image, args.out.as_deref(), &config.output_dir),
        (None, None) => Err(anyhow::anyhow!("render did not finish in time")),
    };
    session.close();

    let written: PathBuf = result?;
    t2i_info!("Render finished");
    println!("{}", written.display());
    Ok(())
}

/// Translate command-line input into the edits a user would make in the form.
fn form_messages(config: &PlaygroundConfig, args: &RenderArgs) -> anyhow::Result<Vec<Msg>> {
    let mut msgs = vec![Msg::OptionsReplaced(config.default_options.clone())];
    msgs.extend(args.options.changes().into_iter().map(Msg::OptionsChanged));

    if let Some(id) = &args.preset {
        msgs.push(Msg::PresetClicked(id.clone()));
    }
    if let Some(path) = &args.template {
        let template = fs::read_to_string(path)
            .with_context(|| format!("failed to read template {:?}", path))?;
        msgs.push(Msg::TemplateChanged(template));
    }
    if let Some(path) = &args.data {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read template data {:?}", path))?;
        msgs.push(Msg::TemplateDataChanged(data));
    } else if let Some(json) = &args.data_json {
        msgs.push(Msg::TemplateDataChanged(json.clone()));
    }
    if let Some(url) = &args.select {
        msgs.push(Msg::EndpointSelected(url.clone()));
    }
    if let Some(url) = &args.endpoint {
        msgs.push(Msg::CustomEndpointChanged(url.clone()));
    }
    Ok(msgs)
}
