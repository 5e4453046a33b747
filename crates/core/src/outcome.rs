//! Tagged results handed back across the IPC and HTTP boundaries.
//!
//! Each stage reports an outcome value rather than an error so the UI always
//! receives something it can render.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result of the full PPTX to PDF to images pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "PipelinePayload")]
pub enum PipelineOutcome {
    /// Both steps succeeded.
    Converted {
        pdf_path: PathBuf,
        images: Vec<PathBuf>,
    },
    /// The PDF was produced but rendering its pages failed.
    PdfOnly {
        pdf_path: PathBuf,
        image_error: String,
    },
    /// The PDF step failed; no images were attempted.
    Failed { error: String },
}

impl PipelineOutcome {
    /// Whether the PDF step succeeded.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Rendered page images, if the image step succeeded.
    pub fn images(&self) -> Option<&[PathBuf]> {
        match self {
            Self::Converted { images, .. } => Some(images),
            _ => None,
        }
    }

    /// The generated PDF, if any.
    pub fn pdf_path(&self) -> Option<&Path> {
        match self {
            Self::Converted { pdf_path, .. } | Self::PdfOnly { pdf_path, .. } => Some(pdf_path),
            Self::Failed { .. } => None,
        }
    }
}

/// Wire shape of [`PipelineOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelinePayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

impl From<PipelineOutcome> for PipelinePayload {
    fn from(outcome: PipelineOutcome) -> Self {
        match outcome {
            PipelineOutcome::Converted { pdf_path, images } => Self {
                success: true,
                pdf_path: Some(display(&pdf_path)),
                image_paths: Some(images.iter().map(|p| display(p)).collect()),
                error: None,
                image_error: None,
            },
            PipelineOutcome::PdfOnly {
                pdf_path,
                image_error,
            } => Self {
                success: true,
                pdf_path: Some(display(&pdf_path)),
                image_paths: None,
                error: None,
                image_error: Some(image_error),
            },
            PipelineOutcome::Failed { error } => Self {
                success: false,
                pdf_path: None,
                image_paths: None,
                error: Some(error),
                image_error: None,
            },
        }
    }
}

/// Result of the standalone PDF to images operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ImagesPayload")]
pub enum ImagesOutcome {
    Rendered { images: Vec<PathBuf> },
    Failed { error: String },
}

/// Wire shape of [`ImagesOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesPayload {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ImagesOutcome> for ImagesPayload {
    fn from(outcome: ImagesOutcome) -> Self {
        match outcome {
            ImagesOutcome::Rendered { images } => Self {
                success: true,
                image_paths: Some(images.iter().map(|p| display(p)).collect()),
                error: None,
            },
            ImagesOutcome::Failed { error } => Self {
                success: false,
                image_paths: None,
                error: Some(error),
            },
        }
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
