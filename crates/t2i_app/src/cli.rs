use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use t2i_core::{OptionChange, ScaleLevel};

/// Text2Image Playground - render HTML templates to images through a remote endpoint
#[derive(Parser, Debug)]
#[command(name = "t2i-playground")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./playground.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal, global = true)]
    pub log_to: LogTarget,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List active endpoints from the directory.
    Endpoints,
    /// List the bundled preset gallery.
    Presets,
    /// Print screenshot options as a Python dict for plugin code.
    Options(OptionArgs),
    /// Render a template to an image file.
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Image quality (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Render timeout in seconds (5-120).
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=120))]
    pub timeout: Option<u32>,

    /// Capture the full scrollable page.
    #[arg(long, overrides_with = "no_full_page")]
    pub full_page: bool,

    /// Capture only the viewport.
    #[arg(long, overrides_with = "full_page")]
    pub no_full_page: bool,

    /// Device scale factor level: normal (1.0), high (1.3) or ultra (1.8).
    #[arg(long, value_parser = parse_scale_level)]
    pub scale: Option<ScaleLevel>,

    /// Transparent background (forces PNG output).
    #[arg(long, overrides_with = "keep_background")]
    pub omit_background: bool,

    /// Opaque background (JPEG output).
    #[arg(long, overrides_with = "omit_background")]
    pub keep_background: bool,
}

impl OptionArgs {
    /// Only flags the user actually passed become changes.
    pub fn changes(&self) -> Vec<OptionChange> {
        let mut changes = Vec::new();
        if let Some(quality) = self.quality {
            changes.push(OptionChange::Quality(Some(quality)));
        }
        if let Some(timeout) = self.timeout {
            changes.push(OptionChange::Timeout(Some(timeout)));
        }
        if self.full_page {
            changes.push(OptionChange::FullPage(Some(true)));
        } else if self.no_full_page {
            changes.push(OptionChange::FullPage(Some(false)));
        }
        if let Some(scale) = self.scale {
            changes.push(OptionChange::ScaleLevel(Some(scale)));
        }
        if self.omit_background {
            changes.push(OptionChange::OmitBackground(Some(true)));
        } else if self.keep_background {
            changes.push(OptionChange::OmitBackground(Some(false)));
        }
        changes
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Template file (HTML with {{ placeholders }}).
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// JSON file with template data.
    #[arg(long, conflicts_with = "data_json")]
    pub data: Option<PathBuf>,

    /// Template data as an inline JSON string.
    #[arg(long)]
    pub data_json: Option<String>,

    /// Start from a bundled preset; --template/--data still override it.
    #[arg(long)]
    pub preset: Option<String>,

    /// Custom endpoint: full URL, /text2img service root, or bare host.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Pick this endpoint from the directory instead of the first one.
    #[arg(long)]
    pub select: Option<String>,

    /// Output file. Defaults to <output_dir>/render-<timestamp>.<ext>.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub options: OptionArgs,
}

fn parse_scale_level(raw: &str) -> Result<ScaleLevel, String> {
    raw.parse()
}
