//! Persisted slide list for restoring the last session at start-up.

use crate::error::{Error, Result};
use crate::types::Slide;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk shape of the saved session.
#[derive(Debug, Serialize, Deserialize)]
struct SavedSession {
    slides: Vec<Slide>,
}

/// JSON file holding the current slide list.
///
/// The list is always written and read as a whole.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved slide list.
    ///
    /// A missing, unreadable or corrupt file yields `None`.
    pub fn load(&self) -> Option<Vec<Slide>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read session {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<SavedSession>(&content) {
            Ok(session) => Some(session.slides),
            Err(e) => {
                log::warn!("Ignoring corrupt session {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Replace the saved slide list.
    pub fn save(&self, slides: &[Slide]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let session = SavedSession {
            slides: slides.to_vec(),
        };
        let json = serde_json::to_string_pretty(&session)
            .map_err(|e| Error::Session(format!("Failed to serialize slides: {}", e)))?;

        fs::write(&self.path, json)?;
        log::debug!("Saved {} slides to {}", slides.len(), self.path.display());
        Ok(())
    }

    /// Forget the saved slide list.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
