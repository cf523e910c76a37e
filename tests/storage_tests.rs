use kochi::storage::NewsletterStore;

#[tokio::test]
async fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = NewsletterStore::new(dir.path(), "https://example.com");

    let stored = store.save("<html>hello</html>").await.unwrap();
    assert_eq!(stored.url, format!("https://example.com/n/{}", stored.id));
    assert!(stored.path.ends_with(format!("{}.html", stored.id)));

    let loaded = store.load(&stored.id).await.unwrap();
    assert_eq!(loaded.as_deref(), Some("<html>hello</html>"));
}

#[tokio::test]
async fn test_each_save_gets_a_fresh_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = NewsletterStore::new(dir.path(), "https://example.com");

    let a = store.save("a").await.unwrap();
    let b = store.save("b").await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_load_unknown_id_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = NewsletterStore::new(dir.path(), "https://example.com");

    let loaded = store
        .load("7f9c24e5-2b3a-4f08-9d6e-1a2b3c4d5e6f")
        .await
        .unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn test_load_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = NewsletterStore::new(dir.path(), "https://example.com");

    assert_eq!(store.load("../secrets").await.unwrap(), None);
    assert_eq!(store.load("").await.unwrap(), None);
    assert_eq!(store.load("id.html/..").await.unwrap(), None);
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let store = NewsletterStore::new(dir.path(), "https://example.com/");

    let stored = store.save("x").await.unwrap();
    assert_eq!(stored.url, format!("https://example.com/n/{}", stored.id));
}
