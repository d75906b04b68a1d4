//! Storage schema.
//!
//! The key space is flat:
//!
//! | key | value |
//! |---|---|
//! | `"styles"` | object, style name → CSS text |
//! | anything else | URL prefix → array of style names, in apply order |
//!
//! There is no versioning. Values that do not have the expected shape are
//! skipped with a warning and otherwise treated as absent.

use std::collections::BTreeMap;

use serde_json::Value;
use turnstyle_common::warning::warn_once;

use crate::area::Items;

/// The reserved key holding every saved style.
pub const STYLES_KEY: &str = "styles";

/// Saved styles, name → CSS text.
pub type StyleMap = BTreeMap<String, String>;

/// Whether `key` names a page association (every key but [`STYLES_KEY`]).
#[must_use]
pub fn is_page_key(key: &str) -> bool {
    key != STYLES_KEY
}

/// Decode the value stored under [`STYLES_KEY`].
#[must_use]
pub fn decode_styles(value: Value) -> Option<StyleMap> {
    match serde_json::from_value(value) {
        Ok(styles) => Some(styles),
        Err(e) => {
            warn_once("Storage", &format!("ignoring malformed '{STYLES_KEY}' entry: {e}"));
            None
        }
    }
}

/// Decode the style-name list stored under a page key.
#[must_use]
pub fn decode_page(key: &str, value: Value) -> Option<Vec<String>> {
    match serde_json::from_value(value) {
        Ok(names) => Some(names),
        Err(_) => {
            warn_once(
                "Storage",
                &format!("ignoring page entry '{key}': not a list of style names"),
            );
            None
        }
    }
}

/// The single-entry write that replaces the whole styles mapping.
#[must_use]
pub fn styles_entry(styles: &StyleMap) -> Items {
    let value = Value::Object(
        styles
            .iter()
            .map(|(name, rules)| (name.clone(), Value::String(rules.clone())))
            .collect(),
    );
    Items::from([(STYLES_KEY.to_string(), value)])
}

/// The JSON value stored under a page key.
#[must_use]
pub fn page_value(names: &[String]) -> Value {
    Value::Array(names.iter().cloned().map(Value::String).collect())
}

/// The single-entry write for one page association.
#[must_use]
pub fn page_entry(url: &str, names: &[String]) -> Items {
    Items::from([(url.to_string(), page_value(names))])
}

/// The whole key space, decoded and partitioned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Saved styles.
    pub styles: StyleMap,
    /// Page associations, URL prefix → style names.
    pub pages: BTreeMap<String, Vec<String>>,
}

impl Snapshot {
    /// Partition raw storage entries into styles and page associations.
    #[must_use]
    pub fn from_items(items: Items) -> Self {
        let mut snapshot = Self::default();
        for (key, value) in items {
            if is_page_key(&key) {
                if let Some(names) = decode_page(&key, value) {
                    let _ = snapshot.pages.insert(key, names);
                }
            } else if let Some(styles) = decode_styles(value) {
                snapshot.styles = styles;
            }
        }
        snapshot
    }

    /// URLs whose association list contains `style_name`, in key order.
    #[must_use]
    pub fn urls_using(&self, style_name: &str) -> Vec<String> {
        self.pages
            .iter()
            .filter(|(_, names)| names.iter().any(|n| n == style_name))
            .map(|(url, _)| url.clone())
            .collect()
    }
}
