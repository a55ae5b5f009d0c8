#![allow(dead_code)]

use portfolio_site::adapters::storage::MemoryPreferenceStore;
use portfolio_site::app::{create_router, AppState};
use portfolio_site::domain::ports::PreferenceStore;
use portfolio_site::{ChatSession, ContentStore};
use std::sync::Arc;

pub fn fixture_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/content.toml")
}

pub fn fixture_store() -> Arc<ContentStore> {
    Arc::new(ContentStore::from_file(fixture_path()).unwrap())
}

/// Binds the site to an ephemeral port and returns its base URL.
pub async fn spawn_site<S>(chat: Option<ChatSession>, preferences: S, static_dir: Option<&str>) -> String
where
    S: PreferenceStore + 'static,
{
    spawn_site_with_store(fixture_store(), chat, preferences, static_dir).await
}

/// Fixture content with one line of the TOML rewritten.
pub fn fixture_store_with(from: &str, to: &str) -> Arc<ContentStore> {
    let content = std::fs::read_to_string(fixture_path()).unwrap();
    assert!(content.contains(from), "fixture has no line {from:?}");
    Arc::new(ContentStore::from_toml_str(&content.replace(from, to)).unwrap())
}

pub async fn spawn_site_with_store<S>(
    store: Arc<ContentStore>,
    chat: Option<ChatSession>,
    preferences: S,
    static_dir: Option<&str>,
) -> String
where
    S: PreferenceStore + 'static,
{
    let state = Arc::new(AppState::new(store, chat, preferences).await);
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub async fn spawn_default_site() -> String {
    spawn_site(None, MemoryPreferenceStore::new(), None).await
}
