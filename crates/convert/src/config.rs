//! Converter configuration.

use slides_core::RasterOptions;
use std::path::{Path, PathBuf};

/// Default LibreOffice executable.
pub const DEFAULT_OFFICE_PROGRAM: &str = "soffice";

/// Default ImageMagick executable.
pub const DEFAULT_RASTER_PROGRAM: &str = "convert";

/// Which external tools to run and where their output goes by default.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    office_program: PathBuf,
    raster_program: PathBuf,
    work_dir: PathBuf,
    raster: RasterOptions,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            office_program: PathBuf::from(DEFAULT_OFFICE_PROGRAM),
            raster_program: PathBuf::from(DEFAULT_RASTER_PROGRAM),
            work_dir: std::env::temp_dir().join("slides-viewer"),
            raster: RasterOptions::default(),
        }
    }
}

impl ConverterConfig {
    /// Create a configuration using `soffice`, `convert` and a temp working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different LibreOffice executable.
    pub fn with_office_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.office_program = program.into();
        self
    }

    /// Use a different ImageMagick executable (e.g. `magick` on IM7).
    pub fn with_raster_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.raster_program = program.into();
        self
    }

    /// Directory used when a request does not name one.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Default density and quality for rendering.
    pub fn with_raster_options(mut self, options: RasterOptions) -> Self {
        self.raster = options;
        self
    }

    pub fn office_program(&self) -> &Path {
        &self.office_program
    }

    pub fn raster_program(&self) -> &Path {
        &self.raster_program
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn raster_options(&self) -> RasterOptions {
        self.raster
    }

    /// Resolve an optional output directory against the working directory.
    pub fn output_dir<'a>(&'a self, requested: Option<&'a Path>) -> &'a Path {
        match requested {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => &self.work_dir,
        }
    }
}
