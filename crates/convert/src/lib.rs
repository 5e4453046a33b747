//! PPTX to PDF to JPEG conversion pipeline.
//!
//! Drives LibreOffice in headless mode for the PDF step and ImageMagick for
//! rendering each PDF page to a numbered JPEG.

pub mod config;
pub mod office;
pub mod pipeline;
pub mod raster;
mod tool;

#[cfg(all(test, unix))]
mod test_support;

pub use config::ConverterConfig;
pub use office::{convert_to_pdf, pdf_path_for};
pub use pipeline::{ConversionRequest, Pipeline};
pub use raster::{convert_to_images, find_page_images};
