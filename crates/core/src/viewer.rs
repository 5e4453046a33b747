//! Slide viewer state.
//!
//! The host owns this state so overlapping conversions can be refused in one
//! place. The UI only renders [`ViewerSnapshot`]s.

use crate::error::{Error, Result};
use crate::outcome::PipelineOutcome;
use crate::types::{slides_from_images, Slide};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Message shown when a conversion ends without viewable slides.
const RESELECT_HINT: &str = "Please select the file again.";

/// Where the viewer currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    /// Nothing loaded; the file picker is shown.
    NoFileSelected,
    /// A conversion is running for `source`.
    Converting { source: PathBuf },
    /// Slides are available; `current` is 1-based.
    Viewing { slides: Vec<Slide>, current: u32 },
    /// The last conversion failed.
    ConversionFailed { message: String },
}

/// Slide viewer state machine.
#[derive(Debug, Clone)]
pub struct Viewer {
    state: ViewerState,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            state: ViewerState::NoFileSelected,
        }
    }
}

impl Viewer {
    /// Create a viewer with no file selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Whether a conversion is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewerState::Converting { .. })
    }

    /// Start converting `source`, dropping any slides currently shown.
    ///
    /// Fails with [`Error::Busy`] while another conversion is running.
    pub fn begin(&mut self, source: impl Into<PathBuf>) -> Result<()> {
        if self.is_loading() {
            return Err(Error::Busy);
        }
        self.state = ViewerState::Converting {
            source: source.into(),
        };
        Ok(())
    }

    /// Apply the result of the running conversion.
    ///
    /// Returns the new slide list when slides became viewable.
    pub fn finish(&mut self, outcome: &PipelineOutcome) -> Result<Option<&[Slide]>> {
        let source = match &self.state {
            ViewerState::Converting { source } => source.clone(),
            _ => return Err(Error::NotConverting),
        };

        self.state = match outcome {
            PipelineOutcome::Converted { images, .. } if !images.is_empty() => {
                ViewerState::Viewing {
                    slides: slides_from_images(images),
                    current: 1,
                }
            }
            PipelineOutcome::Converted { .. } => ViewerState::ConversionFailed {
                message: format!(
                    "No slides were generated from {}. {}",
                    source.display(),
                    RESELECT_HINT
                ),
            },
            PipelineOutcome::PdfOnly { image_error, .. } => ViewerState::ConversionFailed {
                message: format!("Failed to render slides: {}. {}", image_error, RESELECT_HINT),
            },
            PipelineOutcome::Failed { error } => ViewerState::ConversionFailed {
                message: format!("Conversion failed: {}. {}", error, RESELECT_HINT),
            },
        };

        Ok(self.slides())
    }

    /// Restore a previously saved slide list without converting again.
    pub fn restore(&mut self, slides: Vec<Slide>) {
        if self.is_loading() || slides.is_empty() {
            return;
        }
        self.state = ViewerState::Viewing { slides, current: 1 };
    }

    /// Go back to the file picker.
    pub fn reset(&mut self) {
        self.state = ViewerState::NoFileSelected;
    }

    /// Slides being viewed, if any.
    pub fn slides(&self) -> Option<&[Slide]> {
        match &self.state {
            ViewerState::Viewing { slides, .. } => Some(slides),
            _ => None,
        }
    }

    /// Jump to slide `number`, clamped to the available range.
    pub fn go_to(&mut self, number: u32) {
        if let ViewerState::Viewing { slides, current } = &mut self.state {
            let last = u32::try_from(slides.len()).unwrap_or(u32::MAX);
            *current = number.clamp(1, last.max(1));
        }
    }

    /// Advance one slide.
    pub fn next(&mut self) {
        if let ViewerState::Viewing { current, .. } = self.state {
            self.go_to(current.saturating_add(1));
        }
    }

    /// Go back one slide.
    pub fn previous(&mut self) {
        if let ViewerState::Viewing { current, .. } = self.state {
            self.go_to(current.saturating_sub(1));
        }
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> ViewerSnapshot {
        let mut snapshot = ViewerSnapshot {
            state: ViewerPhase::NoFileSelected,
            slides: Vec::new(),
            current_slide: 0,
            source: None,
            message: None,
            loading: self.is_loading(),
        };

        match &self.state {
            ViewerState::NoFileSelected => {}
            ViewerState::Converting { source } => {
                snapshot.state = ViewerPhase::Converting;
                snapshot.source = Some(source.to_string_lossy().into_owned());
            }
            ViewerState::Viewing { slides, current } => {
                snapshot.state = ViewerPhase::Viewing;
                snapshot.slides = slides.clone();
                snapshot.current_slide = *current;
            }
            ViewerState::ConversionFailed { message } => {
                snapshot.state = ViewerPhase::ConversionFailed;
                snapshot.message = Some(message.clone());
            }
        }

        snapshot
    }
}

/// Name of a [`ViewerState`] for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerPhase {
    NoFileSelected,
    Converting,
    Viewing,
    ConversionFailed,
}

/// What the UI needs to render the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSnapshot {
    pub state: ViewerPhase,
    pub slides: Vec<Slide>,
    /// 1-based; 0 when nothing is shown.
    pub current_slide: u32,
    pub source: Option<String>,
    pub message: Option<String>,
    pub loading: bool,
}
