use t2i_core::{ImageFormat, PlaygroundViewModel};

const TITLE: &str = "Text2Image Playground";

pub fn header(view: &PlaygroundViewModel) -> String {
    match &view.star_badge {
        Some(badge) => format!("{TITLE}  [GitHub ★ {badge}]"),
        None => TITLE.to_string(),
    }
}

pub fn status_line(view: &PlaygroundViewModel) -> String {
    let endpoint = view.effective_endpoint.as_deref().unwrap_or("(none)");
    let activity = if view.loading {
        "Generating image..."
    } else if view.endpoints_loading {
        "Loading endpoints..."
    } else {
        "Ready"
    };
    let mut line = format!(
        "{activity} | Endpoint: {endpoint} | Endpoints listed: {}",
        view.endpoints.len()
    );
    if let Some(image) = &view.image {
        line.push_str(&format!(
            " | Result: {} ({} bytes)",
            format_label(image.format),
            image.byte_len
        ));
    }
    if let Some(error) = &view.error {
        line.push_str(&format!(" | Error: {error}"));
    }
    if let Some(notice) = &view.notice {
        line.push_str(&format!(" | {notice}"));
    }
    line
}

pub fn endpoint_lines(view: &PlaygroundViewModel) -> Vec<String> {
    if view.endpoints.is_empty() {
        return vec!["No active endpoints available; pass --endpoint to use your own.".to_string()];
    }
    view.endpoints
        .iter()
        .map(|url| {
            let marker = if view.selected_endpoint.as_deref() == Some(url.as_str()) {
                '*'
            } else {
                ' '
            };
            format!("{marker} {url}")
        })
        .collect()
}

pub fn preset_lines(view: &PlaygroundViewModel) -> Vec<String> {
    if view.presets.is_empty() {
        return vec!["No presets found.".to_string()];
    }
    view.presets
        .iter()
        .map(|card| {
            let mut line = format!("{:<20} {} - {}", card.id, card.name, card.description);
            if let Some(author) = &card.author {
                line.push_str(&format!(" (by {author})"));
            }
            if card.has_preview {
                line.push_str(" [preview]");
            }
            line
        })
        .collect()
}

fn format_label(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Webp => "WebP",
        ImageFormat::Unknown => "unknown format",
    }
}
