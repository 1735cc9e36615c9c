use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use t2i_core::{ImageFormat, RenderedImage};
use t2i_engine::AtomicFileWriter;
use t2i_logging::t2i_info;

pub fn default_file_name(format: ImageFormat, at: DateTime<Utc>) -> String {
    format!("render-{}.{}", at.format("%Y%m%dT%H%M%SZ"), format.extension())
}

/// Write the image to `out`, or to a timestamped file under `output_dir`.
pub fn write_image(
    image: &RenderedImage,
    out: Option<&Path>,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let (writer, filename) = match out {
        Some(path) => {
            let filename = path
                .file_name()
                .with_context(|| format!("output path {:?} has no file name", path))?
                .to_string_lossy()
                .into_owned();
            (AtomicFileWriter::for_target(path), filename)
        }
        None => (
            AtomicFileWriter::new(output_dir.to_path_buf()),
            default_file_name(image.format, Utc::now()),
        ),
    };

    let written = writer
        .write(&filename, &image.bytes)
        .with_context(|| format!("failed to write image {:?}", filename))?;
    t2i_info!("Wrote {} bytes to {:?}", image.len(), written);
    Ok(written)
}
