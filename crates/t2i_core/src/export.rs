use crate::ScreenshotOptions;

/// Render options as a Python dict literal for pasting into plugin code.
///
/// `timeout` is emitted in milliseconds and `type` is always present.
pub fn python_dict(options: &ScreenshotOptions) -> String {
    let mut entries = Vec::new();

    if let Some(quality) = options.quality {
        entries.push(format!("    \"quality\": {quality}"));
    }
    if let Some(timeout) = options.timeout_millis() {
        entries.push(format!("    \"timeout\": {timeout}"));
    }
    if let Some(level) = options.device_scale_factor_level {
        entries.push(format!("    \"device_scale_factor_level\": \"{level}\""));
    }
    if let Some(full_page) = options.full_page {
        entries.push(format!("    \"full_page\": {}", python_bool(full_page)));
    }
    if let Some(omit) = options.omit_background {
        entries.push(format!("    \"omit_background\": {}", python_bool(omit)));
    }
    entries.push(format!("    \"type\": \"{}\"", options.image_type().as_str()));

    format!("{{\n{}\n}}", entries.join(",\n"))
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Compact star badge: `999`, `1.2K`, `12.3K`.
pub fn format_star_count(count: u64) -> String {
    if count < 1000 {
        return count.to_string();
    }
    // Round half up to one decimal in integer space.
    let tenths = (count + 50) / 100;
    format!("{}.{}K", tenths / 10, tenths % 10)
}
