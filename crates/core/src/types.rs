//! Domain types shared by the converter, the desktop host and the server.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default rasterization density in dots per inch.
pub const DEFAULT_DENSITY: u32 = 150;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u32 = 90;

/// The format of a file handed to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    /// PowerPoint presentation (Office Open XML).
    Pptx,
    /// Portable Document Format.
    Pdf,
}

impl InputFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }

        None
    }

    /// Detect the format of a file on disk, preferring its content over its name.
    pub fn detect(path: &Path) -> Option<Self> {
        let mut magic = [0u8; 8];
        let from_content = std::fs::File::open(path).ok().and_then(|mut file| {
            use std::io::Read;
            let read = file.read(&mut magic).ok()?;
            Self::from_magic(&magic[..read])
        });

        from_content.or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(Self::from_extension)
        })
    }
}

/// Rendering settings for the PDF to image step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterOptions {
    /// Resolution in dots per inch.
    pub density: u32,
    /// JPEG quality, 1 to 100.
    pub quality: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl RasterOptions {
    /// Create options with the default density and quality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the density (at least 1 dpi).
    pub fn with_density(mut self, density: u32) -> Self {
        self.density = density.max(1);
        self
    }

    /// Set the JPEG quality, clamped to 1..=100.
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Apply optional overrides, keeping current values where none is given.
    pub fn with_overrides(self, density: Option<u32>, quality: Option<u32>) -> Self {
        let options = match density {
            Some(d) => self.with_density(d),
            None => self,
        };
        match quality {
            Some(q) => options.with_quality(q),
            None => options,
        }
    }
}

/// A single slide as shown in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Path to the rendered slide image.
    pub thumbnail: String,
}

impl Slide {
    /// Create a slide record for the given position and image.
    pub fn new(id: u32, thumbnail: impl Into<String>) -> Self {
        Self {
            id,
            title: format!("Slide {}", id),
            thumbnail: thumbnail.into(),
        }
    }
}

/// Build slide records from an ordered list of rendered images.
pub fn slides_from_images<P: AsRef<Path>>(images: &[P]) -> Vec<Slide> {
    images
        .iter()
        .zip(1u32..)
        .map(|(image, id)| Slide::new(id, image.as_ref().to_string_lossy()))
        .collect()
}
