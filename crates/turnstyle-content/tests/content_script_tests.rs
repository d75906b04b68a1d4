//! Tests for loading a page and the persistence operations.

use std::future::pending;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use turnstyle_content::{ContentConfig, ContentError, ContentScript};
use turnstyle_dom::DomTree;
use turnstyle_storage::{
    InMemoryStorage, Items, STYLES_KEY, Snapshot, StorageArea, StorageError,
};

const PAGE: &str = "https://example.com/blog/post1";

fn seeded() -> InMemoryStorage {
    InMemoryStorage::with_items(Items::from([
        (
            STYLES_KEY.to_string(),
            json!({
                "dark mode": "body { background: #000; }",
                "serif": "body { font-family: serif; }",
                "unused": "p {}",
            }),
        ),
        ("https://example.com".to_string(), json!(["serif"])),
        (
            "https://example.com/blog".to_string(),
            json!(["dark mode", "missing", "serif"]),
        ),
        ("https://other.test".to_string(), json!(["unused"])),
    ]))
}

async fn load(store: &InMemoryStorage) -> ContentScript<InMemoryStorage> {
    ContentScript::load(
        PAGE,
        DomTree::html_document(),
        store.clone(),
        ContentConfig::default(),
    )
    .await
    .unwrap()
}

/// `(id, text)` of every applied style node, in document order.
fn applied(script: &ContentScript<InMemoryStorage>) -> Vec<(String, String)> {
    let dom = script.dom();
    dom.get_elements_by_class_name("turnstyle")
        .into_iter()
        .map(|node| {
            let id = dom
                .as_element(node)
                .and_then(|e| e.id())
                .unwrap_or_default()
                .to_string();
            (id, dom.text_content(node))
        })
        .collect()
}

fn pages(store: &InMemoryStorage) -> Snapshot {
    Snapshot::from_items(store.items())
}

// ========== load ==========

#[tokio::test]
async fn test_load_applies_listed_styles_in_order() {
    let script = load(&seeded()).await;

    assert_eq!(script.settings().active_url, "https://example.com/blog");
    assert_eq!(
        applied(&script),
        vec![
            (
                "dark-mode".to_string(),
                "body { background: #000; }".to_string()
            ),
            (
                "serif".to_string(),
                "body { font-family: serif; }".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_load_without_settings_applies_nothing() {
    let store = InMemoryStorage::new();
    let script = load(&store).await;

    assert_eq!(script.settings().active_url, "https://example.com");
    assert!(applied(&script).is_empty());
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn test_load_rejects_opaque_origin() {
    let result = ContentScript::load(
        "data:text/html,hello",
        DomTree::html_document(),
        InMemoryStorage::new(),
        ContentConfig::default(),
    )
    .await;
    assert!(matches!(result, Err(ContentError::Url(_))));
}

// ========== save_style ==========

#[tokio::test]
async fn test_save_style_is_create_only_unless_overwriting() {
    let store = seeded();
    let mut script = load(&store).await;

    assert!(!script.save_style("serif", "p { x: 1; }", false).await.unwrap());
    assert_eq!(pages(&store).styles["serif"], "body { font-family: serif; }");

    assert!(script.save_style("serif", "p { x: 1; }", true).await.unwrap());
    assert_eq!(pages(&store).styles["serif"], "p { x: 1; }");

    assert!(script.save_style("new", "p {}", false).await.unwrap());
    assert_eq!(pages(&store).styles.len(), 4);
}

// ========== page associations ==========

#[tokio::test]
async fn test_set_and_unset_page_style() {
    let store = seeded();
    let mut script = load(&store).await;

    script.set_page_style("unused").await.unwrap();
    script.set_page_style("unused").await.unwrap();
    assert_eq!(
        pages(&store).pages["https://example.com/blog"],
        vec!["dark mode", "missing", "serif", "unused"]
    );

    script.unset_page_style("dark mode").await.unwrap();
    assert_eq!(
        pages(&store).pages["https://example.com/blog"],
        vec!["missing", "serif", "unused"]
    );
    assert_eq!(pages(&store).pages["https://example.com"], vec!["serif"]);
}

#[tokio::test]
async fn test_first_association_lands_on_the_origin() {
    let store = InMemoryStorage::new();
    let mut script = load(&store).await;
    assert!(!script.settings().matched);

    script.add_style("dark", "body { color: #fff; }").await.unwrap();
    assert!(script.settings().matched);

    let snapshot = pages(&store);
    assert_eq!(snapshot.pages["https://example.com"], vec!["dark"]);
    assert_eq!(snapshot.styles["dark"], "body { color: #fff; }");
    assert_eq!(applied(&script).len(), 1);
}

#[tokio::test]
async fn test_add_existing_style_applies_saved_rules_once() {
    let store = seeded();
    let mut script = load(&store).await;

    script.add_style("serif", "ignored {}").await.unwrap();

    let nodes = applied(&script);
    assert_eq!(nodes.iter().filter(|(id, _)| id == "serif").count(), 1);
    assert_eq!(
        nodes.last().map(|(_, text)| text.as_str()),
        Some("body { font-family: serif; }")
    );
    assert_eq!(pages(&store).styles["serif"], "body { font-family: serif; }");
}

// ========== clear_storage ==========

#[tokio::test]
async fn test_clear_settings_removes_only_active_key() {
    let store = seeded();
    let mut script = load(&store).await;

    script.clear_storage(false).await.unwrap();

    let snapshot = pages(&store);
    assert!(!snapshot.pages.contains_key("https://example.com/blog"));
    assert!(snapshot.pages.contains_key("https://example.com"));
    assert!(snapshot.pages.contains_key("https://other.test"));
    assert_eq!(snapshot.styles.len(), 3);
    assert!(applied(&script).is_empty());
    assert!(script.settings().page_styles.is_empty());
}

#[tokio::test]
async fn test_clear_all_empties_storage_and_page() {
    let store = seeded();
    let mut script = load(&store).await;

    script.clear_storage(true).await.unwrap();

    assert!(store.items().is_empty());
    assert!(applied(&script).is_empty());
}

// ========== edit_style ==========

#[tokio::test]
async fn test_edit_style_reinserts_last_with_new_rules() {
    let store = seeded();
    let mut script = load(&store).await;

    script
        .edit_style("dark mode", "body { background: #111; }")
        .await
        .unwrap();

    let nodes = applied(&script);
    assert_eq!(nodes.iter().filter(|(id, _)| id == "dark-mode").count(), 1);
    assert_eq!(
        nodes.last(),
        Some(&(
            "dark-mode".to_string(),
            "body { background: #111; }".to_string()
        ))
    );
    assert_eq!(
        pages(&store).styles["dark mode"],
        "body { background: #111; }"
    );
}

// ========== change_active_url ==========

#[tokio::test]
async fn test_change_active_url_copies_list_to_new_key() {
    let store = seeded();
    let mut script = load(&store).await;

    script
        .change_active_url("https://example.com/blog/post")
        .await
        .unwrap();

    assert_eq!(script.settings().active_url, "https://example.com/blog/post");
    let snapshot = pages(&store);
    assert_eq!(
        snapshot.pages["https://example.com/blog/post"],
        snapshot.pages["https://example.com/blog"]
    );
}

#[tokio::test]
async fn test_change_active_url_validates() {
    let store = seeded();
    let mut script = load(&store).await;

    assert!(matches!(
        script.change_active_url("https://example.com/shop").await,
        Err(ContentError::Url(_))
    ));
    assert!(matches!(
        script.change_active_url("https://").await,
        Err(ContentError::Url(_))
    ));
    assert_eq!(script.settings().active_url, "https://example.com/blog");
    assert_eq!(store.items().len(), 4);
}

// ========== timeouts ==========

/// Storage whose reads work but whose writes never complete.
#[derive(Debug)]
struct StuckWrites(InMemoryStorage);

impl StorageArea for StuckWrites {
    async fn get_all(&self) -> Result<Items, StorageError> {
        self.0.get_all().await
    }
    async fn get(&self, keys: &[&str]) -> Result<Items, StorageError> {
        self.0.get(keys).await
    }
    async fn set(&self, _items: Items) -> Result<(), StorageError> {
        pending().await
    }
    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        pending().await
    }
}

#[tokio::test]
async fn test_stuck_storage_times_out() {
    let config = ContentConfig {
        storage_timeout_ms: 20,
        ..ContentConfig::default()
    };
    let mut script = ContentScript::load(
        PAGE,
        DomTree::html_document(),
        StuckWrites(seeded()),
        config,
    )
    .await
    .unwrap();

    let result = script.save_style("new", "p {}", false).await;
    assert!(matches!(
        result,
        Err(ContentError::Storage(StorageError::Timeout(d))) if d == Duration::from_millis(20)
    ));

    // The page keeps its styles when storage could not be cleared.
    assert!(script.clear_storage(true).await.is_err());
    assert_eq!(script.dom().get_elements_by_class_name("turnstyle").len(), 2);
}
