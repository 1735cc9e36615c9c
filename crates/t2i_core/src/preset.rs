use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scaffolding preset kept out of the gallery.
pub const EXCLUDED_PRESET_ID: &str = "helloworld";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetMeta {
    pub preset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmpldata: Option<Value>,
}

impl PresetMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            preset_name: name.into(),
            description: None,
            author: None,
            social_url: None,
            tmpldata: None,
        }
    }
}

/// A bundled template plus sample data. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub id: String,
    pub template: String,
    pub meta: PresetMeta,
    pub preview: Option<PathBuf>,
}

impl Preset {
    /// Sample data pretty-printed the way the data editor shows it.
    pub fn data_text(&self) -> String {
        let data = self
            .meta
            .tmpldata
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
    }
}
