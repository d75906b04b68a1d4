//! Settings resolution: which saved styles apply to the current page.
//!
//! Every stored key other than `"styles"` is a URL prefix. A key matches the
//! page when the page's full URL starts with it, compared as literal strings
//! (no pattern syntax: a `.` in a key only matches a `.`).
//!
//! When several keys match, they are sorted ascending and the last one wins.
//! All matching keys are prefixes of the same string, so any two of them are
//! prefixes of each other, and a proper prefix always sorts first. The
//! lexicographically last match is therefore also the longest one, which is
//! what the rule is after.

use turnstyle_storage::schema::is_page_key;
use turnstyle_storage::{Snapshot, StyleMap};

/// Choose the active URL key for `full_url` among `keys`.
///
/// The reserved styles key and the empty key never match.
pub fn select_active_url<'a>(
    full_url: &str,
    keys: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let mut matches: Vec<&str> = keys
        .into_iter()
        .filter(|key| !key.is_empty() && is_page_key(key) && full_url.starts_with(key))
        .collect();
    matches.sort_unstable();
    matches.last().copied()
}

/// The resolved settings of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    /// Scheme, host and port of the page.
    pub origin: String,
    /// The page's full URL.
    pub full_url: String,
    /// Key page associations are read from and written to. The matched key,
    /// or the origin when nothing matched.
    pub active_url: String,
    /// Whether `active_url` came from a stored key.
    pub matched: bool,
    /// Style names active on this page, in apply order.
    pub page_styles: Vec<String>,
    /// Every saved style.
    pub styles: StyleMap,
}

impl PageSettings {
    /// Settings for a page with nothing saved.
    #[must_use]
    pub fn empty(origin: &str, full_url: &str) -> Self {
        Self {
            origin: origin.to_string(),
            full_url: full_url.to_string(),
            active_url: origin.to_string(),
            matched: false,
            page_styles: Vec::new(),
            styles: StyleMap::new(),
        }
    }

    /// Resolve the page's settings from a storage snapshot.
    #[must_use]
    pub fn resolve(origin: &str, full_url: &str, snapshot: Snapshot) -> Self {
        let mut settings = Self::empty(origin, full_url);
        let Snapshot { styles, mut pages } = snapshot;
        settings.styles = styles;

        let active =
            select_active_url(full_url, pages.keys().map(String::as_str)).map(str::to_string);
        if let Some(url) = active {
            settings.page_styles = pages.remove(&url).unwrap_or_default();
            settings.active_url = url;
            settings.matched = true;
        }
        settings
    }

    /// The page's styles that have saved rules, as `(name, rules)` in apply
    /// order. Names without a saved style are skipped.
    pub fn resolvable_styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.page_styles.iter().filter_map(|name| {
            self.styles
                .get(name)
                .map(|rules| (name.as_str(), rules.as_str()))
        })
    }
}
