//! The popup ↔ content script message protocol.
//!
//! Requests are JSON objects with an `instruction` field naming the operation
//! plus the fields that operation needs, in camelCase:
//!
//! ```json
//! {"instruction": "saveStyle", "styleName": "dark mode", "styleRules": "body { background: #000; }"}
//! ```
//!
//! Unknown extra fields are ignored, so older popups that send more than an
//! instruction needs keep working.

use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;
use turnstyle_storage::StyleMap;

use crate::resolver::PageSettings;

/// A request from the popup or options page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "instruction", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Request {
    /// Report the page's resolved settings. Read-only.
    GetPageSettings,

    /// Insert a style node without saving anything. Inserting with the
    /// preview id replaces the previous preview.
    #[serde(rename_all = "camelCase")]
    InsertStyle {
        /// CSS text.
        style_rules: String,
        /// DOM id for the new node.
        style_id: String,
        /// Extra class for the new node.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
    },

    /// Remove style nodes, by id or by class (the marker class by default).
    /// With `delete`, also drop `styleName` from the page's saved list.
    #[serde(rename_all = "camelCase")]
    RemoveStyle {
        /// Id of the single node to remove.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style_id: Option<String>,
        /// Class of the nodes to remove when no id is given.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class_name: Option<String>,
        /// Style to unset from the page when `delete` is set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style_name: Option<String>,
        /// Also update the saved page association.
        #[serde(default)]
        delete: bool,
    },

    /// Apply a new style to the page and save it (create-only) together with
    /// the page association.
    #[serde(rename_all = "camelCase")]
    SaveStyle {
        /// Unique style name.
        style_name: String,
        /// CSS text.
        style_rules: String,
    },

    /// Replace an applied style's rules, on the page and in storage.
    #[serde(rename_all = "camelCase")]
    EditStyle {
        /// Name of the style to edit.
        style_name: String,
        /// New CSS text.
        style_rules: String,
    },

    /// Save the page's style list under a different URL key and make that
    /// key active.
    #[serde(rename_all = "camelCase")]
    ChangeUrl {
        /// New URL key; must be a prefix of the page URL within its origin.
        url: String,
    },

    /// Forget the page's association and remove every applied style.
    #[serde(rename = "clear settings")]
    #[strum(serialize = "clear settings")]
    ClearSettings,

    /// Erase all of storage and remove every applied style.
    #[serde(rename = "clear all")]
    #[strum(serialize = "clear all")]
    ClearAll,
}

impl Request {
    /// The wire name of this request's instruction.
    #[must_use]
    pub fn instruction(&self) -> &'static str {
        self.into()
    }
}

/// The page's settings as reported to the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettingsResponse {
    /// Page origin.
    pub base_url: String,
    /// Full page URL.
    pub full_url: String,
    /// Key the page's styles are saved under.
    pub active_url: String,
    /// Styles active on the page, in apply order.
    pub page_styles: Vec<String>,
    /// Every saved style.
    pub styles: StyleMap,
}

impl From<&PageSettings> for PageSettingsResponse {
    fn from(settings: &PageSettings) -> Self {
        Self {
            base_url: settings.origin.clone(),
            full_url: settings.full_url.clone(),
            active_url: settings.active_url.clone(),
            page_styles: settings.page_styles.clone(),
            styles: settings.styles.clone(),
        }
    }
}

/// The content script's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Answer to `getPageSettings`.
    PageSettings(PageSettingsResponse),
    /// The request was not carried out; `error` is shown to the user.
    Error {
        /// What went wrong.
        error: String,
    },
    /// Acknowledgement.
    Message {
        /// Short description of what was done.
        message: String,
    },
}

impl Response {
    /// An acknowledgement.
    #[must_use]
    pub fn message(message: &str) -> Self {
        Self::Message {
            message: message.to_string(),
        }
    }

    /// A failure report.
    #[must_use]
    pub fn error(error: impl ToString) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}
