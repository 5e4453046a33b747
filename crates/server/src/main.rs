//! HTTP server converting uploaded presentations to PDF.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use slides_convert::ConverterConfig;
use slides_server::{serve, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tiny_http::Server;

/// Serve POST /api/convert, turning uploaded .pptx files into PDFs.
#[derive(Parser, Debug)]
#[command(name = "slides-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "SLIDES_BIND", default_value = "127.0.0.1:3000")]
    bind: String,

    /// Number of request worker threads
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Maximum upload size in megabytes
    #[arg(long, default_value = "10")]
    max_upload_mb: u64,

    /// Directory for per-request scratch space (default: system temp dir)
    #[arg(long, env = "SLIDES_WORK_DIR")]
    temp_dir: Option<PathBuf>,

    /// LibreOffice executable
    #[arg(long, env = "SLIDES_SOFFICE", default_value = "soffice")]
    soffice: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig {
        max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
        temp_root: args.temp_dir,
        converter: ConverterConfig::new().with_office_program(args.soffice),
    };

    let server = Server::http(&args.bind)
        .map_err(|e| anyhow!("Failed to listen on {}: {}", args.bind, e))?;
    log::info!("Listening on http://{} with {} workers", args.bind, args.workers);

    serve(Arc::new(server), Arc::new(config), args.workers).context("Request workers stopped")?;
    Ok(())
}
