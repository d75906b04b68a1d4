//! Tests for settings resolution.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use turnstyle_content::{PageSettings, select_active_url};
use turnstyle_storage::{Snapshot, StyleMap};

fn snapshot(styles: &[(&str, &str)], pages: &[(&str, &[&str])]) -> Snapshot {
    Snapshot {
        styles: styles
            .iter()
            .map(|(n, r)| ((*n).to_string(), (*r).to_string()))
            .collect::<StyleMap>(),
        pages: pages
            .iter()
            .map(|(url, names)| {
                (
                    (*url).to_string(),
                    names.iter().map(|n| (*n).to_string()).collect(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

// ========== active URL selection ==========

#[test]
fn test_nested_keys_pick_the_more_specific() {
    let keys = ["http://example.com", "http://example.com/blog"];
    assert_eq!(
        select_active_url("http://example.com/blog/post1", keys),
        Some("http://example.com/blog")
    );
}

#[test]
fn test_selection_ignores_key_order() {
    let keys = ["http://example.com/blog", "http://example.com/b", "http://example.com"];
    assert_eq!(
        select_active_url("http://example.com/blog/post1", keys),
        Some("http://example.com/blog")
    );
}

#[test]
fn test_keys_match_as_literal_prefixes() {
    // A '.' is only a '.', and there is no implicit path boundary.
    assert_eq!(select_active_url("http://exampleXcom/", ["http://example.com"]), None);
    assert_eq!(
        select_active_url("http://example.community/", ["http://example.com"]),
        Some("http://example.com")
    );
}

#[test]
fn test_reserved_and_empty_keys_never_match() {
    assert_eq!(select_active_url("styles/page", ["styles", ""]), None);
}

// ========== page settings ==========

#[test]
fn test_resolve_keeps_list_order_and_skips_unknown_names() {
    let settings = PageSettings::resolve(
        "https://a.test",
        "https://a.test/x",
        snapshot(
            &[("one", "p { color: red; }"), ("two", "p { color: blue; }")],
            &[("https://a.test", &["two", "gone", "one"])],
        ),
    );

    assert_eq!(settings.active_url, "https://a.test");
    assert!(settings.matched);
    let resolved: Vec<_> = settings.resolvable_styles().collect();
    assert_eq!(
        resolved,
        vec![("two", "p { color: blue; }"), ("one", "p { color: red; }")]
    );
}

#[test]
fn test_unmatched_page_falls_back_to_origin() {
    let settings = PageSettings::resolve(
        "https://b.test",
        "https://b.test/x",
        snapshot(&[("one", "p {}")], &[("https://a.test", &["one"])]),
    );

    assert_eq!(settings.active_url, "https://b.test");
    assert!(!settings.matched);
    assert!(settings.page_styles.is_empty());
    assert_eq!(settings.styles.len(), 1);
}
