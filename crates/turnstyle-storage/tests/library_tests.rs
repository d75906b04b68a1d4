//! Tests for the options-page library operations.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use turnstyle_common::url::UrlError;
use turnstyle_storage::{InMemoryStorage, Items, Library, LibraryError, STYLES_KEY, Snapshot};

fn library() -> (Library<InMemoryStorage>, InMemoryStorage) {
    let store = InMemoryStorage::with_items(Items::from([
        (
            STYLES_KEY.to_string(),
            json!({"dark": "body { background: #000; }", "wide": "main { max-width: none; }"}),
        ),
        ("https://a.test".to_string(), json!(["dark", "wide"])),
        ("https://b.test/docs".to_string(), json!(["wide"])),
    ]));
    (Library::new(store.clone(), Duration::from_secs(1)), store)
}

fn snapshot(store: &InMemoryStorage) -> Snapshot {
    Snapshot::from_items(store.items())
}

#[tokio::test]
async fn test_styles_lists_urls_per_style() {
    let (library, _) = library();
    let styles = library.styles().await.unwrap();
    let names: Vec<&str> = styles.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["dark", "wide"]);
    assert_eq!(styles[0].urls, vec!["https://a.test".to_string()]);
    assert_eq!(
        styles[1].urls,
        vec!["https://a.test".to_string(), "https://b.test/docs".to_string()]
    );
}

#[tokio::test]
async fn test_add_style_rejects_taken_and_empty() {
    let (library, store) = library();
    assert!(matches!(
        library.add_style("dark", "p {}").await,
        Err(LibraryError::NameTaken(name)) if name == "dark"
    ));
    assert!(matches!(library.add_style("", "p {}").await, Err(LibraryError::EmptyName)));
    assert!(matches!(library.add_style("x", "").await, Err(LibraryError::EmptyRules)));

    library.add_style("serif", "body { font-family: serif; }").await.unwrap();
    assert_eq!(snapshot(&store).styles.len(), 3);
}

#[tokio::test]
async fn test_add_style_rejects_blank_input() {
    let (library, store) = library();
    assert!(matches!(library.add_style("   ", "p {}").await, Err(LibraryError::EmptyName)));
    assert!(matches!(library.add_style("x", " \n\t").await, Err(LibraryError::EmptyRules)));
    assert!(matches!(library.rename_style("dark", " ").await, Err(LibraryError::EmptyName)));
    assert_eq!(snapshot(&store).styles.len(), 2);
}

#[tokio::test]
async fn test_save_style_replaces_rules_without_touching_urls() {
    let (library, store) = library();
    let before = snapshot(&store).pages;

    library.save_style("dark", "body { background: #111; }").await.unwrap();
    library.save_style("serif", "body { font-family: serif; }").await.unwrap();

    let after = snapshot(&store);
    assert_eq!(after.styles["dark"], "body { background: #111; }");
    assert_eq!(after.styles["serif"], "body { font-family: serif; }");
    assert_eq!(after.pages, before);
    assert!(matches!(library.save_style("dark", "").await, Err(LibraryError::EmptyRules)));
}

#[tokio::test]
async fn test_delete_style_cascades_to_every_url() {
    let (library, store) = library();
    library.delete_style("wide").await.unwrap();

    let after = snapshot(&store);
    assert!(!after.styles.contains_key("wide"));
    assert_eq!(after.pages["https://a.test"], vec!["dark".to_string()]);
    assert!(after.pages["https://b.test/docs"].is_empty());

    library.delete_style("never-saved").await.unwrap();
}

#[tokio::test]
async fn test_rename_style_moves_rules_and_references() {
    let (library, store) = library();
    library.rename_style("dark", "midnight").await.unwrap();

    let after = snapshot(&store);
    assert!(!after.styles.contains_key("dark"));
    assert_eq!(after.styles["midnight"], "body { background: #000; }");
    assert_eq!(
        after.pages["https://a.test"],
        vec!["wide".to_string(), "midnight".to_string()]
    );
}

#[tokio::test]
async fn test_rename_style_errors() {
    let (library, _) = library();
    assert!(matches!(
        library.rename_style("dark", "wide").await,
        Err(LibraryError::NameTaken(_))
    ));
    assert!(matches!(
        library.rename_style("ghost", "spirit").await,
        Err(LibraryError::UnknownStyle(_))
    ));
    library.rename_style("dark", "dark").await.unwrap();
}

#[tokio::test]
async fn test_add_url_to_style() {
    let (library, store) = library();
    library.add_url_to_style("https://c.test", "dark").await.unwrap();
    library.add_url_to_style("https://b.test/docs", "dark").await.unwrap();
    library.add_url_to_style("https://b.test/docs", "dark").await.unwrap();

    let after = snapshot(&store);
    assert_eq!(after.pages["https://c.test"], vec!["dark".to_string()]);
    assert_eq!(
        after.pages["https://b.test/docs"],
        vec!["wide".to_string(), "dark".to_string()]
    );

    assert!(matches!(
        library.add_url_to_style("not a url", "dark").await,
        Err(LibraryError::Url(UrlError::Invalid))
    ));
    assert!(matches!(
        library.add_url_to_style("https://c.test", "ghost").await,
        Err(LibraryError::UnknownStyle(_))
    ));
}

#[tokio::test]
async fn test_save_url_style_upserts_and_appends_once() {
    let (library, store) = library();
    library
        .save_url_style("https://b.test/docs", "dark", "body { background: #111; }")
        .await
        .unwrap();
    library
        .save_url_style("https://b.test/docs", "dark", "body { background: #222; }")
        .await
        .unwrap();

    let after = snapshot(&store);
    assert_eq!(after.styles["dark"], "body { background: #222; }");
    assert_eq!(
        after.pages["https://b.test/docs"],
        vec!["wide".to_string(), "dark".to_string()]
    );
    assert!(matches!(
        library.save_url_style("https://nowhere.test", "dark", "p {}").await,
        Err(LibraryError::UnknownUrl(_))
    ));
}

#[tokio::test]
async fn test_remove_style_from_url_and_delete_url() {
    let (library, store) = library();
    library.remove_style_from_url("https://a.test", "dark").await.unwrap();
    assert_eq!(snapshot(&store).pages["https://a.test"], vec!["wide".to_string()]);

    library.delete_url("https://a.test").await.unwrap();
    let after = snapshot(&store);
    assert!(!after.pages.contains_key("https://a.test"));
    assert_eq!(after.styles.len(), 2);

    assert!(matches!(
        library.delete_url(STYLES_KEY).await,
        Err(LibraryError::UnknownUrl(_))
    ));
    assert_eq!(snapshot(&store).styles.len(), 2);
}

#[tokio::test]
async fn test_rename_url_moves_list() {
    let (library, store) = library();
    library
        .rename_url("https://b.test/docs", "https://b.test/docs/v2")
        .await
        .unwrap();

    let after = snapshot(&store);
    assert!(!after.pages.contains_key("https://b.test/docs"));
    assert_eq!(after.pages["https://b.test/docs/v2"], vec!["wide".to_string()]);

    assert!(matches!(
        library.rename_url("https://a.test", "b.test").await,
        Err(LibraryError::Url(UrlError::Invalid))
    ));
    assert!(matches!(
        library.rename_url("https://ghost.test", "https://c.test").await,
        Err(LibraryError::UnknownUrl(_))
    ));
}
