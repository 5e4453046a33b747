//! Reading, validating and converting an uploaded presentation.

use crate::config::ServerConfig;
use multipart::server::Multipart;
use slides_convert::convert_to_pdf;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Name of the form field carrying the presentation.
pub const FILE_FIELD: &str = "file";

/// Room allowed for multipart framing on top of the file itself.
const FORM_OVERHEAD: u64 = 64 * 1024;

/// Why an upload was refused before conversion.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("No file uploaded.")]
    NoFile,

    #[error("Only .pptx files are supported.")]
    NotPptx,

    #[error("File size must be ≤ {}.", size_label(.0))]
    TooLarge(u64),

    #[error("Malformed upload: {0}")]
    Malformed(String),
}

/// `10MB` for whole megabytes, a byte count otherwise.
fn size_label(bytes: &u64) -> String {
    const MB: u64 = 1024 * 1024;
    let bytes = *bytes;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// A presentation received from a client.
#[derive(Debug)]
pub struct Upload {
    /// Client-supplied file name, reduced to its last component.
    pub filename: String,
    pub data: Vec<u8>,
}

/// Extract the multipart boundary from a `Content-Type` value.
fn boundary(content_type: &str) -> Option<&str> {
    let mut parts = content_type.split(';');
    let mime = parts.next()?.trim();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }

    parts
        .filter_map(|p| p.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("boundary"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// Strip any client-side directories from an uploaded file name.
fn base_name(name: &str) -> Option<&str> {
    name.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
}

/// Read the `file` field from a multipart request body.
///
/// Checks type and size as the body is read, so nothing is converted or
/// written to disk for a rejected upload.
pub fn read_upload(
    content_type: Option<&str>,
    declared_len: Option<usize>,
    body: &mut dyn Read,
    max_bytes: u64,
) -> Result<Upload, Rejection> {
    let boundary = content_type
        .and_then(boundary)
        .ok_or_else(|| Rejection::Malformed("expected multipart/form-data".to_string()))?;

    if let Some(len) = declared_len {
        if len as u64 > max_bytes.saturating_add(FORM_OVERHEAD) {
            return Err(Rejection::TooLarge(max_bytes));
        }
    }

    let mut form = Multipart::with_body(body, boundary);
    loop {
        let entry = form
            .read_entry()
            .map_err(|e| Rejection::Malformed(e.to_string()))?;
        let Some(mut field) = entry else {
            return Err(Rejection::NoFile);
        };

        if &*field.headers.name != FILE_FIELD {
            continue;
        }

        let filename = field
            .headers
            .filename
            .as_deref()
            .and_then(base_name)
            .map(str::to_string)
            .ok_or(Rejection::NoFile)?;

        if !filename.to_lowercase().ends_with(".pptx") {
            return Err(Rejection::NotPptx);
        }

        let mut data = Vec::new();
        field
            .data
            .by_ref()
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(|e| Rejection::Malformed(e.to_string()))?;

        if data.len() as u64 > max_bytes {
            return Err(Rejection::TooLarge(max_bytes));
        }

        return Ok(Upload { filename, data });
    }
}

/// Convert an upload to PDF and return the PDF bytes.
///
/// The upload and the PDF live in a fresh `pptx-*` directory which is
/// removed before returning, whatever the outcome.
pub fn convert_upload(upload: &Upload, config: &ServerConfig) -> slides_core::Result<Vec<u8>> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("pptx-");
    let dir = match &config.temp_root {
        Some(root) => {
            fs::create_dir_all(root)?;
            builder.tempdir_in(root)?
        }
        None => builder.tempdir()?,
    };

    let result = convert_in(dir.path(), upload, config);

    let staged = dir.path().display().to_string();
    if let Err(e) = dir.close() {
        log::warn!("Failed to remove {}: {}", staged, e);
    }

    result
}

fn convert_in(dir: &Path, upload: &Upload, config: &ServerConfig) -> slides_core::Result<Vec<u8>> {
    let pptx_path = dir.join(&upload.filename);
    fs::write(&pptx_path, &upload.data)?;

    let pdf_path = convert_to_pdf(&pptx_path, Some(dir), &config.converter)?;
    fs::read(&pdf_path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            slides_core::Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("LibreOffice did not produce {}", pdf_path.display()),
            ))
        } else {
            slides_core::Error::Io(e)
        }
    })
}
