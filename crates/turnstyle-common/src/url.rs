//! URL helpers for page keys.
//!
//! [URL Standard § 4.4 Origin](https://url.spec.whatwg.org/#origin)
//!
//! Page associations are keyed by plain URL strings that act as literal
//! prefixes of the page URL. This module derives the page origin used as the
//! default key, and validates URL keys entered by the user.

use ::url::{Origin, Url};
use thiserror::Error;

/// Schemes accepted for URL keys entered on the options page.
const SITE_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// A URL key rejected by validation.
///
/// The `Display` text is shown to the user as an inline message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The string does not parse as an absolute site URL.
    #[error("That's not a valid URL")]
    Invalid,
    /// The page URL has an opaque origin (`data:`, `about:blank`, ...).
    #[error("Pages without an origin can't be styled")]
    OpaqueOrigin,
    /// The key is not a prefix of the current page URL.
    #[error("The URL has to match this page in some way")]
    NotAPrefix,
    /// The key leaves the page origin.
    #[error("The URL has to start with {0}")]
    OutsideOrigin(String),
}

/// [URL Standard § 4.4 Origin](https://url.spec.whatwg.org/#concept-url-origin)
///
/// "The serialization of an origin is the string obtained by applying the
/// following algorithm: ... scheme, "://", host, and ":" port if non-null."
///
/// Returns the ASCII serialization of the page's origin, e.g.
/// `https://example.com:8443`. Default ports are elided.
///
/// # Errors
///
/// Returns [`UrlError::Invalid`] if `full_url` does not parse, and
/// [`UrlError::OpaqueOrigin`] for URLs without a tuple origin.
pub fn page_origin(full_url: &str) -> Result<String, UrlError> {
    let url = Url::parse(full_url).map_err(|_| UrlError::Invalid)?;
    match url.origin() {
        origin @ Origin::Tuple(..) => Ok(origin.ascii_serialization()),
        Origin::Opaque(_) => Err(UrlError::OpaqueOrigin),
    }
}

/// Whether `candidate` is usable as a stored URL key: an absolute `http`,
/// `https` or `ftp` URL with a host.
#[must_use]
pub fn is_valid_site_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| {
        SITE_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Check a user-chosen active URL against the page it is edited from.
///
/// The key must be a literal prefix of the page's full URL (otherwise it
/// would never match this page) and must itself start with the page origin.
///
/// # Errors
///
/// Returns [`UrlError::NotAPrefix`] or [`UrlError::OutsideOrigin`].
pub fn check_active_url(candidate: &str, full_url: &str, origin: &str) -> Result<(), UrlError> {
    if !full_url.starts_with(candidate) {
        return Err(UrlError::NotAPrefix);
    }
    if !candidate.starts_with(origin) {
        return Err(UrlError::OutsideOrigin(origin.to_string()));
    }
    Ok(())
}
