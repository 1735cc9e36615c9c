//! Playground configuration, read from a RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use t2i_core::ScreenshotOptions;
use t2i_engine::{ClientSettings, EngineSettings, DEFAULT_DIRECTORY_URL, DEFAULT_STAR_REPO_URL};
use t2i_logging::t2i_info;

pub const DEFAULT_CONFIG_FILE: &str = "playground.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub directory_url: String,
    pub star_repo_url: String,
    pub presets_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: u64,
    #[serde(default = "ScreenshotOptions::playground_defaults")]
    pub default_options: ScreenshotOptions,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            star_repo_url: DEFAULT_STAR_REPO_URL.to_string(),
            presets_dir: PathBuf::from("./presets"),
            output_dir: PathBuf::from("./output"),
            log_file: PathBuf::from("./playground.log"),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            max_image_bytes: 32 * 1024 * 1024,
            default_options: ScreenshotOptions::playground_defaults(),
        }
    }
}

impl PlaygroundConfig {
    /// Load `explicit` if given (it must exist), else `./playground.ron` if
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file {:?} does not exist", path);
                }
                path.to_path_buf()
            }
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config =
            Self::from_ron_str(&text).with_context(|| format!("failed to parse config {:?}", path))?;
        t2i_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            client: ClientSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_body_bytes: self.max_image_bytes,
                ..ClientSettings::default()
            },
            directory_url: self.directory_url.clone(),
            star_repo_url: self.star_repo_url.clone(),
        }
    }

    /// Upper bound on waiting for one round of engine work. The HTTP timeouts
    /// fire well before this.
    pub fn settle_deadline(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs + self.request_timeout_secs + 5)
    }
}
