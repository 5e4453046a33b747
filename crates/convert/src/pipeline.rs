//! PPTX to PDF to images, as one request.

use crate::config::ConverterConfig;
use crate::{office, raster};
use slides_core::{ImagesOutcome, PipelineOutcome, RasterOptions};
use std::path::{Path, PathBuf};

/// A single conversion request.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Presentation to convert.
    pub input: PathBuf,
    /// Where the PDF and images go; the working directory when `None`.
    pub output_dir: Option<PathBuf>,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// Runs the conversion steps in order and reports tagged outcomes.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: ConverterConfig,
}

impl Pipeline {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Convert to PDF, then render the PDF's pages.
    ///
    /// The image step only runs when the PDF step succeeded. An image
    /// failure still reports the PDF.
    pub fn run(&self, request: &ConversionRequest) -> PipelineOutcome {
        let output_dir = request.output_dir.as_deref();

        let pdf_path = match office::convert_to_pdf(&request.input, output_dir, &self.config) {
            Ok(path) => path,
            Err(e) => {
                log::error!("Error converting {} to PDF: {}", request.input.display(), e);
                return PipelineOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        match raster::convert_to_images(
            &pdf_path,
            output_dir,
            self.config.raster_options(),
            &self.config,
        ) {
            Ok(images) => PipelineOutcome::Converted { pdf_path, images },
            Err(e) => {
                log::error!("Error rendering {}: {}", pdf_path.display(), e);
                PipelineOutcome::PdfOnly {
                    pdf_path,
                    image_error: e.to_string(),
                }
            }
        }
    }

    /// Render an existing PDF, with optional density and quality overrides.
    pub fn pdf_to_images(
        &self,
        pdf: &Path,
        output_dir: Option<&Path>,
        density: Option<u32>,
        quality: Option<u32>,
    ) -> ImagesOutcome {
        let options: RasterOptions = self.config.raster_options().with_overrides(density, quality);

        match raster::convert_to_images(pdf, output_dir, options, &self.config) {
            Ok(images) => ImagesOutcome::Rendered { images },
            Err(e) => {
                log::error!("Error rendering {}: {}", pdf.display(), e);
                ImagesOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::{failing, fake_office, fake_raster};
    use slides_core::slides_from_images;
    use std::fs;

    struct Fixture {
        tools: tempfile::TempDir,
        work: tempfile::TempDir,
        input: PathBuf,
    }

    fn fixture() -> Fixture {
        let tools = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let input = work.path().join("deck.pptx");
        fs::write(&input, b"PK\x03\x04").unwrap();
        Fixture { tools, work, input }
    }

    #[test]
    fn test_deck_scenario() {
        let fx = fixture();
        let out = fx.work.path().join("converted");
        let pipeline = Pipeline::new(
            ConverterConfig::new()
                .with_office_program(fake_office(fx.tools.path()))
                .with_raster_program(fake_raster(fx.tools.path(), 5))
                .with_work_dir(&out),
        );

        let outcome = pipeline.run(&ConversionRequest::new(&fx.input));
        let images = outcome.images().expect("images").to_vec();

        assert_eq!(outcome.pdf_path(), Some(out.join("deck.pdf").as_path()));
        assert_eq!(images.first(), Some(&out.join("deck-000.jpg")));
        assert_eq!(images.last(), Some(&out.join("deck-004.jpg")));

        let slides = slides_from_images(&images);
        let titles: Vec<_> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Slide 1", "Slide 2", "Slide 3", "Slide 4", "Slide 5"]);
    }

    #[test]
    fn test_office_failure_skips_images() {
        let fx = fixture();
        let pipeline = Pipeline::new(
            ConverterConfig::new()
                .with_office_program(failing(fx.tools.path(), "soffice", "soffice crashed"))
                .with_raster_program(fake_raster(fx.tools.path(), 3)),
        );

        let request = ConversionRequest::new(&fx.input).with_output_dir(fx.work.path());
        match pipeline.run(&request) {
            PipelineOutcome::Failed { error } => assert!(error.contains("soffice crashed")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!fx.tools.path().join("convert.args").exists());
    }

    #[test]
    fn test_image_failure_keeps_pdf() {
        let fx = fixture();
        let pipeline = Pipeline::new(
            ConverterConfig::new()
                .with_office_program(fake_office(fx.tools.path()))
                .with_raster_program(fake_raster(fx.tools.path(), 0)),
        );

        let request = ConversionRequest::new(&fx.input).with_output_dir(fx.work.path());
        match pipeline.run(&request) {
            PipelineOutcome::PdfOnly {
                pdf_path,
                image_error,
            } => {
                assert_eq!(pdf_path, fx.work.path().join("deck.pdf"));
                assert!(image_error.starts_with("No images generated"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let fx = fixture();
        let pipeline = Pipeline::new(
            ConverterConfig::new()
                .with_office_program(fake_office(fx.tools.path()))
                .with_raster_program(fake_raster(fx.tools.path(), 3)),
        );
        let out = fx.work.path().join("out");
        let request = ConversionRequest::new(&fx.input).with_output_dir(&out);

        let first = pipeline.run(&request);
        let second = pipeline.run(&request);
        assert_eq!(first, second);
        // deck.pdf plus three pages
        assert_eq!(fs::read_dir(&out).unwrap().count(), 4);
    }

    #[test]
    fn test_edited_deck_replaces_old_slides() {
        let fx = fixture();
        let out = fx.work.path().join("converted");
        let request = ConversionRequest::new(&fx.input).with_output_dir(&out);

        let before = Pipeline::new(
            ConverterConfig::new()
                .with_office_program(fake_office(fx.tools.path()))
                .with_raster_program(fake_raster(fx.tools.path(), 5)),
        );
        assert_eq!(before.run(&request).images().map(|i| i.len()), Some(5));

        let tools = tempfile::tempdir().unwrap();
        let after = Pipeline::new(
            ConverterConfig::new()
                .with_office_program(fake_office(tools.path()))
                .with_raster_program(fake_raster(tools.path(), 2)),
        );
        let outcome = after.run(&request);
        let images = outcome.images().expect("images");

        assert_eq!(images, &[out.join("deck-000.jpg"), out.join("deck-001.jpg")][..]);
        // deck.pdf plus two pages
        assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    }

    #[test]
    fn test_pdf_to_images_overrides() {
        let fx = fixture();
        let pipeline = Pipeline::new(
            ConverterConfig::new().with_raster_program(fake_raster(fx.tools.path(), 2)),
        );
        let pdf = fx.work.path().join("deck.pdf");

        let outcome = pipeline.pdf_to_images(&pdf, Some(fx.work.path()), Some(72), None);
        assert!(matches!(outcome, ImagesOutcome::Rendered { ref images } if images.len() == 2));

        let args = fs::read_to_string(fx.tools.path().join("convert.args")).unwrap();
        assert!(args.starts_with("-density 72 "));
        assert!(args.contains(" -quality 90 "));
    }

    #[test]
    fn test_pdf_to_images_failure() {
        let fx = fixture();
        let pipeline = Pipeline::new(
            ConverterConfig::new().with_raster_program(fake_raster(fx.tools.path(), 0)),
        );

        let outcome = pipeline.pdf_to_images(&fx.work.path().join("blank.pdf"), Some(fx.work.path()), None, None);
        match outcome {
            ImagesOutcome::Failed { error } => assert!(error.contains("No images generated")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
