//! CLI tool for converting presentations into per-slide images.

use anyhow::{bail, Context, Result};
use clap::Parser;
use slides_convert::{convert_to_images, convert_to_pdf, ConverterConfig};
use slides_core::{slides_from_images, Error, InputFormat, RasterOptions};
use std::path::{Path, PathBuf};

/// Convert PowerPoint files to PDF and render one JPEG per slide.
#[derive(Parser, Debug)]
#[command(name = "slides-convert")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) (.pptx, or .pdf to only render images)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long, env = "SLIDES_WORK_DIR")]
    output: Option<PathBuf>,

    /// Rendering resolution in dpi
    #[arg(short, long, default_value = "150")]
    density: u32,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "90")]
    quality: u32,

    /// Stop after producing the PDF
    #[arg(long)]
    pdf_only: bool,

    /// Print the slide list as JSON instead of plain paths
    #[arg(long)]
    json: bool,

    /// LibreOffice executable
    #[arg(long, env = "SLIDES_SOFFICE", default_value = "soffice")]
    soffice: PathBuf,

    /// ImageMagick executable
    #[arg(long, env = "SLIDES_MAGICK", default_value = "convert")]
    magick: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// What a single input produced.
#[derive(Debug)]
struct Converted {
    pdf_path: Option<PathBuf>,
    images: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = RasterOptions::new()
        .with_density(args.density)
        .with_quality(args.quality);
    let config = ConverterConfig::new()
        .with_office_program(&args.soffice)
        .with_raster_program(&args.magick)
        .with_raster_options(options);

    let mut failed = 0;
    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &config) {
            Ok(converted) => print_result(input_path, &converted, args.json)?,
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} inputs failed", failed, args.input.len());
    }

    Ok(())
}

/// Convert a single file.
fn process_file(input_path: &Path, args: &Args, config: &ConverterConfig) -> Result<Converted> {
    let format = InputFormat::detect(input_path)
        .ok_or_else(|| Error::UnsupportedFormat(input_path.display().to_string()))?;

    let output_dir = get_output_dir(input_path, args.output.as_ref());

    let (pdf_path, pdf) = match format {
        InputFormat::Pptx => {
            log::debug!("Converting presentation to PDF");
            let pdf = convert_to_pdf(input_path, Some(&output_dir), config)
                .with_context(|| format!("Failed to convert {} to PDF", input_path.display()))?;
            (Some(pdf.clone()), pdf)
        }
        InputFormat::Pdf => (None, input_path.to_path_buf()),
    };

    if args.pdf_only {
        if format == InputFormat::Pdf {
            bail!("{} is already a PDF", input_path.display());
        }
        return Ok(Converted {
            pdf_path,
            images: Vec::new(),
        });
    }

    let images = convert_to_images(&pdf, Some(&output_dir), config.raster_options(), config)
        .with_context(|| format!("Failed to render {}", pdf.display()))?;

    if args.verbose {
        eprintln!("  Rendered {} slides", images.len());
    }

    Ok(Converted { pdf_path, images })
}

/// Determine the output directory for a processed file.
fn get_output_dir(input_path: &Path, output_dir: Option<&PathBuf>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.clone(),
        None => match input_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// Print what was produced for one input.
fn print_result(input_path: &Path, converted: &Converted, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "input": input_path.to_string_lossy(),
            "pdfPath": converted.pdf_path.as_ref().map(|p| p.to_string_lossy()),
            "slides": slides_from_images(&converted.images),
        });
        println!("{}", serde_json::to_string(&value).context("Failed to serialize result")?);
        return Ok(());
    }

    if let Some(pdf) = &converted.pdf_path {
        println!("{}", pdf.display());
    }
    for image in &converted.images {
        println!("{}", image.display());
    }
    Ok(())
}
