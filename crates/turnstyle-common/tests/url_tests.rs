//! Tests for page origins and URL key validation.

use turnstyle_common::url::{UrlError, check_active_url, is_valid_site_url, page_origin};
use turnstyle_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_page_origin_elides_default_port() {
    assert_eq!(
        page_origin("https://example.com/blog/post1?x=1#top").unwrap(),
        "https://example.com"
    );
}

#[test]
fn test_page_origin_keeps_explicit_port() {
    assert_eq!(
        page_origin("http://localhost:8080/index.html").unwrap(),
        "http://localhost:8080"
    );
}

#[test]
fn test_page_origin_rejects_opaque_and_garbage() {
    assert_eq!(page_origin("data:text/html,hi"), Err(UrlError::OpaqueOrigin));
    assert_eq!(page_origin("not a url"), Err(UrlError::Invalid));
}

#[test]
fn test_is_valid_site_url() {
    assert!(is_valid_site_url("https://example.com"));
    assert!(is_valid_site_url("http://example.com/blog"));
    assert!(is_valid_site_url("ftp://files.example.org/pub"));
    assert!(!is_valid_site_url("example.com"));
    assert!(!is_valid_site_url("mailto:someone@example.com"));
    assert!(!is_valid_site_url("file:///etc/hosts"));
    assert!(!is_valid_site_url(""));
}

#[test]
fn test_check_active_url_accepts_prefix_within_origin() {
    let full = "https://example.com/blog/post1";
    let origin = "https://example.com";
    assert_eq!(check_active_url("https://example.com/blog", full, origin), Ok(()));
    assert_eq!(check_active_url(full, full, origin), Ok(()));
}

#[test]
fn test_check_active_url_rejects_non_prefix() {
    let err = check_active_url(
        "https://example.com/news",
        "https://example.com/blog/post1",
        "https://example.com",
    )
    .unwrap_err();
    assert_eq!(err, UrlError::NotAPrefix);
    assert_eq!(err.to_string(), "The URL has to match this page in some way");
}

#[test]
fn test_check_active_url_rejects_shorter_than_origin() {
    let err = check_active_url(
        "https://exam",
        "https://example.com/blog",
        "https://example.com",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "The URL has to start with https://example.com");
}

#[test]
fn test_warn_once_records_message() {
    clear_warnings();
    warn_once("Test", "something was skipped");
    warn_once("Test", "something was skipped");
    assert!(has_warned("Test", "something was skipped"));
    assert!(!has_warned("Test", "never emitted"));
}
