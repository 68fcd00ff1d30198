use mockito::{Matcher, Server};
use serde_json::json;
use smartchef::storage::FAVORITES_KEY;
use smartchef::{FileStore, GoogleProvider, KeyValueStore, NoticeLevel, SmartChef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn session(server_url: String, dir: &std::path::Path) -> SmartChef {
    let provider = GoogleProvider::with_base_url(
        "test-key".to_string(),
        server_url,
        "gemini-test".to_string(),
    );
    SmartChef::builder()
        .provider(Box::new(provider))
        .storage(Box::new(FileStore::new(dir)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_generated_favorite_survives_restart() {
    let mut server = Server::new_async().await;
    let text = r#"{"recipes": [{"title": "Okra Gumbo", "cuisine": "Cajun", "diets": ["gluten-free"]}]}"#;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-test:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let chef = session(server.url(), dir.path());
    chef.add_ingredient("Okra");

    let notice = chef.search_recipes().await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Generated 1 custom recipes using AI!");
    mock.assert_async().await;

    let recipe = chef.state().recipes[0].clone();
    chef.toggle_favorite(&recipe);
    assert!(chef.state().recipes[0].is_favorite);
    drop(chef);

    let restarted = session(server.url(), dir.path());
    let favorites = restarted.filter_favorites("gumbo", "all");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, recipe.id);
    assert!(favorites[0].is_favorite);
    assert_eq!(restarted.filter_favorites("", "gluten-free").len(), 1);
}

#[tokio::test]
async fn test_catalog_hit_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let chef = session(server.url(), dir.path());
    chef.add_ingredient("mozzarella");
    chef.update_dietary_preference("vegetarian", true);

    let notice = chef.search_recipes().await;
    assert_eq!(notice.message, "Found 1 recipes!");
    assert_eq!(chef.state().recipes[0].title, "Caprese Salad");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_preferences_persist_between_sessions() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();

    let chef = session(server.url(), dir.path());
    chef.update_dietary_preference("dairy-free", true);
    chef.update_dietary_preference("keto", true);
    chef.update_dietary_preference("keto", false);

    let restarted = session(server.url(), dir.path());
    assert_eq!(restarted.state().enabled_preference_ids(), vec!["dairy-free"]);
}

#[tokio::test]
async fn test_corrupt_favorites_file_is_ignored() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    FileStore::new(dir.path())
        .set(FAVORITES_KEY, "[{\"id\": ")
        .unwrap();

    let chef = session(server.url(), dir.path());
    assert!(chef.state().favorites.is_empty());
}

#[tokio::test]
async fn test_subscribers_see_loading_transitions() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let chef = session(server.url(), dir.path());

    let transitions = Arc::new(AtomicUsize::new(0));
    let loading_seen = Arc::new(AtomicUsize::new(0));
    let (count, loading) = (transitions.clone(), loading_seen.clone());
    chef.store().subscribe(move |state| {
        count.fetch_add(1, Ordering::SeqCst);
        if state.loading {
            loading.fetch_add(1, Ordering::SeqCst);
        }
    });

    chef.add_ingredient("garlic");
    let notice = chef.search_recipes().await;
    assert!(notice.is_success());

    // add, loading on, recipes set
    assert_eq!(transitions.load(Ordering::SeqCst), 3);
    assert_eq!(loading_seen.load(Ordering::SeqCst), 1);
    assert!(!chef.state().loading);
}
