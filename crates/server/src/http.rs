//! Routing and the tiny_http worker pool.

use crate::config::ServerConfig;
use crate::upload::{convert_upload, read_upload};
use serde::Serialize;
use std::io::{self, Read};
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Request, Response, Server};

/// Path of the conversion endpoint.
pub const CONVERT_PATH: &str = "/api/convert";

/// A response before it is handed to tiny_http.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl ApiResponse {
    /// JSON `{ "success": false, "error": ... }` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_vec(&ErrorBody {
            success: false,
            error: message,
        })
        .unwrap_or_default();

        Self {
            status,
            headers: vec![("Content-Type", "application/json".to_string())],
            body,
        }
    }

    /// The converted document.
    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers: vec![
                ("Content-Type", "application/pdf".to_string()),
                (
                    "Content-Disposition",
                    "inline; filename=\"converted.pdf\"".to_string(),
                ),
            ],
            body: bytes,
        }
    }

    fn into_tiny(self) -> Response<io::Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(self.status);
        for (name, value) in &self.headers {
            match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => log::warn!("Dropping invalid header {}", name),
            }
        }
        response
    }
}

/// Dispatch one request.
pub fn route(
    method: &str,
    url: &str,
    content_type: Option<&str>,
    content_length: Option<usize>,
    body: &mut dyn Read,
    config: &ServerConfig,
) -> ApiResponse {
    let path = url.split('?').next().unwrap_or(url);
    if path != CONVERT_PATH {
        return ApiResponse::error(404, "Not found.");
    }
    if !method.eq_ignore_ascii_case("POST") {
        let mut response = ApiResponse::error(405, "Method not allowed.");
        response.headers.push(("Allow", "POST".to_string()));
        return response;
    }

    let upload = match read_upload(content_type, content_length, body, config.max_upload_bytes) {
        Ok(upload) => upload,
        Err(rejection) => {
            log::info!("Rejected upload: {}", rejection);
            return ApiResponse::error(400, &rejection.to_string());
        }
    };

    log::info!("Converting upload {} ({} bytes)", upload.filename, upload.data.len());
    match convert_upload(&upload, config) {
        Ok(pdf) => ApiResponse::pdf(pdf),
        Err(e) => {
            log::error!("Conversion of {} failed: {}", upload.filename, e);
            ApiResponse::error(500, &e.to_string())
        }
    }
}

fn handle_request(mut request: Request, config: &ServerConfig) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_string());
    let content_length = request.body_length();

    let response = route(
        &method,
        &url,
        content_type.as_deref(),
        content_length,
        request.as_reader(),
        config,
    );
    log::debug!("{} {} -> {}", method, url, response.status);

    if let Err(e) = request.respond(response.into_tiny()) {
        log::warn!("Failed to send response for {}: {}", url, e);
    }
}

/// Serve requests on `workers` threads until the server stops.
pub fn serve(server: Arc<Server>, config: Arc<ServerConfig>, workers: usize) -> io::Result<()> {
    let mut handles = Vec::new();
    for id in 0..workers.max(1) {
        let server = Arc::clone(&server);
        let config = Arc::clone(&config);
        let handle = thread::Builder::new()
            .name(format!("convert-worker-{}", id))
            .spawn(move || {
                for request in server.incoming_requests() {
                    handle_request(request, &config);
                }
            })?;
        handles.push(handle);
    }

    for handle in handles {
        if handle.join().is_err() {
            log::error!("A request worker panicked");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::tests::{content_type, form};

    fn post(body: &[u8], config: &ServerConfig) -> ApiResponse {
        let mut reader = body;
        route(
            "POST",
            CONVERT_PATH,
            Some(&content_type()),
            Some(body.len()),
            &mut reader,
            config,
        )
    }

    fn error_message(response: &ApiResponse) -> String {
        let json: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(json["success"], false);
        json["error"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_unknown_path() {
        let mut reader: &[u8] = b"";
        let response = route("GET", "/", None, None, &mut reader, &ServerConfig::default());
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_wrong_method() {
        let mut reader: &[u8] = b"";
        let response = route("GET", "/api/convert?x=1", None, None, &mut reader, &ServerConfig::default());
        assert_eq!(response.status, 405);
        assert!(response.headers.contains(&("Allow", "POST".to_string())));
    }

    #[test]
    fn test_rejections_are_bad_requests() {
        let config = ServerConfig {
            max_upload_bytes: 16,
            // Any spawn would fail loudly.
            converter: slides_convert::ConverterConfig::new()
                .with_office_program("/nonexistent/soffice"),
            ..ServerConfig::default()
        };

        let response = post(&form(&[("other", None, &b"x"[..])]), &config);
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "No file uploaded.");

        let response = post(&form(&[("file", Some("deck.key"), &b"x"[..])]), &config);
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "Only .pptx files are supported.");

        let big = vec![0u8; 64];
        let response = post(&form(&[("file", Some("deck.pptx"), &big[..])]), &config);
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "File size must be ≤ 16 bytes.");
    }

    #[test]
    fn test_tool_failure_is_server_error() {
        let root = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            temp_root: Some(root.path().to_path_buf()),
            converter: slides_convert::ConverterConfig::new()
                .with_office_program("/nonexistent/soffice"),
            ..ServerConfig::default()
        };

        let response = post(&form(&[("file", Some("deck.pptx"), &b"PK\x03\x04"[..])]), &config);
        assert_eq!(response.status, 500);
        assert!(error_message(&response).contains("Failed to start"));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_conversion() {
        let tools = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            temp_root: Some(root.path().to_path_buf()),
            converter: slides_convert::ConverterConfig::new().with_office_program(
                crate::upload::tests::conversion::fake_office(tools.path()),
            ),
            ..ServerConfig::default()
        };

        let response = post(&form(&[("file", Some("Deck.pptx"), &b"PK\x03\x04"[..])]), &config);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"%PDF-1.4 converted\n");
        assert!(response
            .headers
            .contains(&("Content-Type", "application/pdf".to_string())));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }
}
