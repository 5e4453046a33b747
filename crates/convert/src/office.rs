//! PPTX to PDF via LibreOffice in headless mode.

use crate::config::ConverterConfig;
use crate::tool;
use slides_core::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Path LibreOffice writes the PDF for `input` to inside `output_dir`.
pub fn pdf_path_for(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| Error::InvalidInput(format!("{} has no file name", input.display())))?;

    let mut name = stem.to_os_string();
    name.push(".pdf");
    Ok(output_dir.join(name))
}

/// Convert a presentation to PDF.
///
/// `output_dir` defaults to the configured working directory and is created
/// if missing. Returns the expected PDF path once LibreOffice exits
/// successfully; the file itself is not checked.
pub fn convert_to_pdf(
    input: &Path,
    output_dir: Option<&Path>,
    config: &ConverterConfig,
) -> Result<PathBuf> {
    if !input.is_file() {
        return Err(Error::InvalidInput(format!(
            "{} does not exist or is not a file",
            input.display()
        )));
    }

    let output_dir = config.output_dir(output_dir);
    let pdf_path = pdf_path_for(input, output_dir)?;
    tool::ensure_dir(output_dir)?;

    log::info!("Converting {} to PDF in {}", input.display(), output_dir.display());
    tool::run(
        config.office_program(),
        [
            OsStr::new("--headless"),
            OsStr::new("--convert-to"),
            OsStr::new("pdf"),
            OsStr::new("--outdir"),
            output_dir.as_os_str(),
            input.as_os_str(),
        ],
    )?;

    log::info!("Converted {} to {}", input.display(), pdf_path.display());
    Ok(pdf_path)
}
