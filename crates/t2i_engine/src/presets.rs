use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use t2i_core::{Preset, PresetMeta, EXCLUDED_PRESET_ID};
use t2i_logging::{t2i_debug, t2i_info, t2i_warn};

const META_FILE: &str = "preset.json";
const TEMPLATE_FILE: &str = "tmpl.html";
const PREVIEW_EXTENSIONS: [&str; 4] = ["webp", "png", "jpg", "jpeg"];

/// Load the preset gallery from `<dir>/<id>/preset.json` (+ `tmpl.html`,
/// `preview.*`). Only subdirectories with a `preset.json` count.
pub fn load_presets(dir: &Path) -> Vec<Preset> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            t2i_warn!("Cannot read preset directory {:?}: {}", dir, err);
            return Vec::new();
        }
    };

    let mut preset_dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.join(META_FILE).is_file())
        .collect();
    preset_dirs.sort();

    let presets: Vec<Preset> = preset_dirs
        .iter()
        .filter_map(|path| load_one(path))
        .collect();
    t2i_info!("Loaded {} presets from {:?}", presets.len(), dir);
    presets
}

fn load_one(path: &Path) -> Option<Preset> {
    let id = path.file_name()?.to_string_lossy().into_owned();
    if id == EXCLUDED_PRESET_ID {
        return None;
    }

    let meta = read_meta(&path.join(META_FILE)).unwrap_or_else(|| PresetMeta::named(&id));
    let template = match fs::read_to_string(path.join(TEMPLATE_FILE)) {
        Ok(text) => text,
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                t2i_warn!("Failed to read template for preset {}: {}", id, err);
            }
            String::new()
        }
    };
    let preview = PREVIEW_EXTENSIONS
        .iter()
        .map(|ext| path.join(format!("preview.{ext}")))
        .find(|candidate| candidate.is_file());

    t2i_debug!("Preset {} (preview: {})", id, preview.is_some());
    Some(Preset {
        id,
        template,
        meta,
        preview,
    })
}

fn read_meta(path: &Path) -> Option<PresetMeta> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            t2i_warn!("Failed to read {:?}: {}", path, err);
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(meta) => Some(meta),
        Err(err) => {
            t2i_warn!("Failed to parse {:?}: {}", path, err);
            None
        }
    }
}
