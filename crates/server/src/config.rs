//! Server configuration.

use slides_convert::ConverterConfig;
use std::path::PathBuf;

/// Largest accepted upload, in bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Settings shared by all request workers.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Upper bound on the uploaded file size.
    pub max_upload_bytes: u64,
    /// Parent for per-request directories; the system temp dir when `None`.
    pub temp_root: Option<PathBuf>,
    /// External tools used for conversion.
    pub converter: ConverterConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            temp_root: None,
            converter: ConverterConfig::default(),
        }
    }
}
