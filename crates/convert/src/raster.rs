//! PDF pages to numbered JPEGs via ImageMagick.

use crate::config::ConverterConfig;
use crate::tool;
use regex::Regex;
use slides_core::{Error, RasterOptions, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// ImageMagick output file name for `stem`, with a 3-digit page sequence.
///
/// `%` in the stem would be read as a format directive, so it is doubled.
fn output_pattern(stem: &str) -> String {
    format!("{}-%03d.jpg", stem.replace('%', "%%"))
}

/// Find the page images generated for `stem` in `dir`, in page order.
///
/// Only names of the form `<stem>-NNN.jpg` count, so leftovers from other
/// documents in the same directory are ignored.
pub fn find_page_images(dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    let filter = Regex::new(&format!(r"^{}-(\d{{3,}})\.jpg$", regex::escape(stem)))
        .map_err(|e| Error::InvalidInput(format!("Unusable file name {:?}: {}", stem, e)))?;

    let mut pages: Vec<(u64, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if let Some(page) = filter
            .captures(name)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
        {
            pages.push((page, entry.path()));
        }
    }

    pages.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

/// Delete page images left in `dir` by an earlier render of `stem`.
fn clear_page_images(dir: &Path, stem: &str) -> Result<()> {
    let stale = find_page_images(dir, stem)?;
    if !stale.is_empty() {
        log::debug!("Removing {} stale page images from {}", stale.len(), dir.display());
    }
    for path in stale {
        fs::remove_file(&path)?;
    }
    Ok(())
}

/// Render every page of `pdf` to `<output_dir>/<stem>-NNN.jpg`.
///
/// `output_dir` defaults to the configured working directory and is created
/// if missing. Earlier pages rendered under the same name are removed first.
/// Returns the generated images sorted by page. A run that leaves no images
/// behind is an error.
pub fn convert_to_images(
    pdf: &Path,
    output_dir: Option<&Path>,
    options: RasterOptions,
    config: &ConverterConfig,
) -> Result<Vec<PathBuf>> {
    let stem = pdf
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("{} has no usable file name", pdf.display())))?;

    let output_dir = config.output_dir(output_dir);
    tool::ensure_dir(output_dir)?;
    clear_page_images(output_dir, stem)?;

    let density = options.density.to_string();
    let quality = options.quality.to_string();
    let pattern = output_dir.join(output_pattern(stem));

    log::info!(
        "Rendering {} at {} dpi, quality {}",
        pdf.display(),
        options.density,
        options.quality
    );
    tool::run(
        config.raster_program(),
        [
            OsStr::new("-density"),
            OsStr::new(&density),
            pdf.as_os_str(),
            OsStr::new("-quality"),
            OsStr::new(&quality),
            pattern.as_os_str(),
        ],
    )?;

    let images = find_page_images(output_dir, stem)?;
    if images.is_empty() {
        return Err(Error::NoImagesGenerated {
            pdf: pdf.to_path_buf(),
        });
    }

    log::info!("Generated {} slide images in {}", images.len(), output_dir.display());
    Ok(images)
}
