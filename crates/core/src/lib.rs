//! Core domain types, slide records, viewer state and session storage
//! for the presentation slide viewer.

pub mod error;
pub mod outcome;
pub mod session;
pub mod types;
pub mod viewer;

pub use error::{Error, Result};
pub use outcome::{ImagesOutcome, PipelineOutcome};
pub use session::SessionStore;
pub use types::{slides_from_images, InputFormat, RasterOptions, Slide};
pub use viewer::{Viewer, ViewerPhase, ViewerSnapshot, ViewerState};
