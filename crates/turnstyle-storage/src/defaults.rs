//! Styles seeded when the extension is first installed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::area::{StorageArea, timed};
use crate::error::StorageError;
use crate::schema::{STYLES_KEY, StyleMap, decode_styles, styles_entry};

/// Name of the style seeded on install.
pub const BASIC_FORMATTING_NAME: &str = "basic formatting";

/// A readable single-column layout for text-heavy pages.
pub const BASIC_FORMATTING: &str = "body {\n\tmargin: 0 auto !important;\n\tmax-width: 50em !important;\n\tfont-family: 'Roboto', 'Helvetica', 'Arial', sans-serif !important;\n\tline-height: 1.5 !important;\n\tpadding: 4em 1em !important;\n\t color: #555 !important;\n}\
\n\n\
h1,\nh2,\nstrong {\n\tcolor: #333 !important;\n}\
\n\n\
h2 {\n\tmargin-top: 1em !important;\n\tpadding-top:1em !important;\n}\
\n\n\
code,\npre {\n\tbackground: #f5f7f9 !important;\n\tcolor: #474d5a !important;\n}\
\n\n\
code {\n\tpadding: 2px 4px !important;\n\tvertical-align: text-bottom !important;\n}\
\n\n\
pre {\n\tpadding: 1em !important;\n\tborder: none !important;\n\tborder-left: 2px solid #69c !important;\n}";

/// Why the extension's install hook fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallReason {
    /// First install on this profile.
    Install,
    /// The extension was updated.
    Update,
    /// The browser itself was updated.
    ChromeUpdate,
    /// A shared module was updated.
    SharedModuleUpdate,
}

/// Seed [`BASIC_FORMATTING`] on first install.
///
/// Only [`InstallReason::Install`] seeds anything. Styles that already exist
/// (synced from another device, say) are kept, including one that already
/// uses the default's name. Returns whether the default was added.
///
/// # Errors
///
/// Returns a [`StorageError`] if reading or writing storage fails.
pub async fn install_defaults<S: StorageArea>(
    storage: &S,
    reason: InstallReason,
    limit: Duration,
) -> Result<bool, StorageError> {
    if reason != InstallReason::Install {
        return Ok(false);
    }

    let mut stored = timed(limit, storage.get(&[STYLES_KEY])).await?;
    let mut styles: StyleMap = stored
        .remove(STYLES_KEY)
        .and_then(decode_styles)
        .unwrap_or_default();
    if styles.contains_key(BASIC_FORMATTING_NAME) {
        return Ok(false);
    }

    let _ = styles.insert(BASIC_FORMATTING_NAME.to_string(), BASIC_FORMATTING.to_string());
    timed(limit, storage.set(styles_entry(&styles))).await?;
    log::info!("seeded default style '{BASIC_FORMATTING_NAME}'");
    Ok(true)
}
