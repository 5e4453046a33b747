//! HTTP endpoint that converts uploaded PPTX files to PDF.
//!
//! `POST /api/convert` takes a `multipart/form-data` body with a `file`
//! field and answers with the PDF bytes. Every upload is staged in its own
//! temporary directory, removed once the response is built.

pub mod config;
pub mod http;
pub mod upload;

pub use config::ServerConfig;
pub use http::{route, serve, ApiResponse};
