//! Content script configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration:
//!
//! ```json
//! {
//!   "marker_class": "turnstyle",
//!   "preview_id": "ts-preview",
//!   "preview_class": "ts-preview",
//!   "storage_timeout_ms": 5000
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Class carried by every style node turnStyle inserts.
pub const DEFAULT_MARKER_CLASS: &str = "turnstyle";

/// Id (and extra class) of the ephemeral preview style.
pub const DEFAULT_PREVIEW_ID: &str = "ts-preview";

/// Default bound on a single storage call.
pub const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;

/// Settings for one content script instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Marker class on every inserted style node.
    pub marker_class: String,
    /// Id reserved for the preview style.
    pub preview_id: String,
    /// Extra class on the preview style.
    pub preview_class: String,
    /// Upper bound on each storage call, in milliseconds.
    pub storage_timeout_ms: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            preview_id: DEFAULT_PREVIEW_ID.to_string(),
            preview_class: DEFAULT_PREVIEW_ID.to_string(),
            storage_timeout_ms: DEFAULT_STORAGE_TIMEOUT_MS,
        }
    }
}

impl ContentConfig {
    /// Parse a configuration from JSON, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        serde_json::from_str(json).map_err(|e| ContentError::Config(e.to_string()))
    }

    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ContentError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// The storage timeout as a [`Duration`].
    #[must_use]
    pub const fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}
