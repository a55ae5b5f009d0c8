mod common;

use common::{fixture_store_with, spawn_default_site, spawn_site, spawn_site_with_store};
use portfolio_site::adapters::storage::MemoryPreferenceStore;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_health() {
    let base = spawn_default_site().await;
    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_home_view() {
    let base = spawn_default_site().await;
    let (status, home) = get_json(&format!("{base}/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["title"], "Jane Doe | Portfolio");
    assert_eq!(
        home["sections"],
        json!(["hero", "profile", "experience", "skills", "projects", "education"])
    );
    assert_eq!(home["profile"]["availability_status"], "busy");
    assert_eq!(home["skills"][0]["category"], "Languages");
    assert_eq!(home["skills"][2]["category"], "Other");
    assert_eq!(home["featured_posts"].as_array().unwrap().len(), 3);
    assert_eq!(home["resume_available"], true);
}

#[tokio::test]
async fn test_blog_list_filters_and_pages() {
    let base = spawn_default_site().await;

    let (status, all) = get_json(&format!("{base}/blog")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["title"], "Blog | Jane Doe");
    assert_eq!(all["meta"]["per_page"], 9);
    assert_eq!(all["meta"]["total"], 7);
    assert_eq!(all["categories"], json!(["CSS", "PHP", "Rust", "Systems"]));

    let (_, rust) = get_json(&format!("{base}/blog?category=Rust&per_page=2&page=2")).await;
    assert_eq!(rust["meta"]["total"], 3);
    assert_eq!(rust["meta"]["last_page"], 2);
    assert_eq!(rust["posts"][0]["slug"], "rust-traits");
    assert_eq!(rust["category"], "Rust");

    let (_, tagged) = get_json(&format!("{base}/blog?tag=memory")).await;
    let slugs: Vec<&str> = tagged["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["rust-ownership", "memory-models"]);

    let (_, beyond) = get_json(&format!("{base}/blog?page=5")).await;
    assert!(beyond["posts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_blog_post_view_and_missing_post() {
    let base = spawn_default_site().await;

    let (status, post) = get_json(&format!("{base}/blog/rust-ownership")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["title"], "Understanding Rust Ownership");
    assert_eq!(post["published"], "January 5, 2025");
    let ids: Vec<&str> = post["toc"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["ownership-basics", "moves-copies", "the-drop-trait", "moves-copies-1"]
    );
    assert_eq!(post["toc"][2]["text"], "The Drop trait");
    assert_eq!(post["related"].as_array().unwrap().len(), 3);

    let (status, missing) = get_json(&format!("{base}/blog/no-such-post")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["heading"], "Post Not Found");
    assert_eq!(missing["back_link"], "/blog");
}

#[tokio::test]
async fn test_project_views() {
    let base = spawn_default_site().await;

    let (_, list) = get_json(&format!("{base}/projects?category=Web%20Application")).await;
    assert_eq!(list["count"], 5);
    assert_eq!(list["categories"], json!(["Web Application", "Website"]));

    let (_, unused) = get_json(&format!("{base}/projects?category=Mobile")).await;
    assert_eq!(unused["count"], 0);

    let (_, empty_filter) = get_json(&format!("{base}/projects?category=")).await;
    assert_eq!(empty_filter["count"], 7);

    let (status, detail) = get_json(&format!("{base}/projects/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["title"], "Beta | Projects | Jane Doe");
    assert_eq!(detail["timeline"], "May 2024 - Present");

    let (_, gamma) = get_json(&format!("{base}/projects/3")).await;
    assert_eq!(gamma["timeline"], "Until Nov 2023");
    assert!(gamma["related"].as_array().unwrap().is_empty());

    let (status, missing) = get_json(&format!("{base}/projects/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["heading"], "Project Not Found");
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_view() {
    let base = spawn_default_site().await;
    let (status, view) = get_json(&format!("{base}/nowhere/at/all")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(view["heading"], "Page Not Found");
    assert_eq!(view["title"], "Page Not Found | Jane Doe");
}

#[tokio::test]
async fn test_resume_redirects() {
    let base = spawn_default_site().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client.get(format!("{base}/resume")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()["location"],
        "https://example.com/jane-doe-resume.pdf"
    );
}

#[tokio::test]
async fn test_chat_unavailable_without_session() {
    let base = spawn_default_site().await;
    let client = reqwest::Client::new();

    let (_, status) = get_json(&format!("{base}/api/chat")).await;
    assert_eq!(status["available"], false);

    let response = client
        .post(format!("{base}/api/chat"))
        .json(&json!({"messages": [{"role": "user", "content": "Hi"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "The chat assistant is currently unavailable");
}

#[tokio::test]
async fn test_theme_endpoints() {
    let preferences = MemoryPreferenceStore::new();
    let base = spawn_site(None, preferences.clone(), None).await;
    let client = reqwest::Client::new();

    let (_, initial) = get_json(&format!("{base}/api/theme?prefers_dark=true")).await;
    assert_eq!(initial["theme"], "system");
    assert_eq!(initial["applied"], "dark");

    // 另一個客戶端沒有帶偏好，仍拿到伺服器預設
    let (_, other) = get_json(&format!("{base}/api/theme")).await;
    assert_eq!(other["system"], "light");
    assert_eq!(other["applied"], "light");

    let (_, light_client) = get_json(&format!("{base}/api/theme?prefers_dark=false")).await;
    assert_eq!(light_client["applied"], "light");
    let (_, dark_client) = get_json(&format!("{base}/api/theme?prefers_dark=true")).await;
    assert_eq!(dark_client["system"], "dark");
    assert_eq!(dark_client["applied"], "dark");

    let cycled: Value = client
        .post(format!("{base}/api/theme/cycle"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cycled["theme"], "light");
    assert_eq!(cycled["applied"], "light");

    let set: Value = client
        .put(format!("{base}/api/theme"))
        .json(&json!({"theme": "dark"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(set["theme"], "dark");

    use portfolio_site::domain::ports::PreferenceStore;
    assert_eq!(
        preferences.read("theme").await.unwrap().as_deref(),
        Some("dark")
    );

    let bad = client
        .put(format!("{base}/api/theme"))
        .json(&json!({"theme": "neon"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scroll_tracking_endpoints() {
    let base = spawn_default_site().await;
    let client = reqwest::Client::new();

    let section: Value = client
        .post(format!("{base}/api/sections/active"))
        .json(&json!({
            "scroll_y": 700.0,
            "viewport_height": 900.0,
            "sections": {
                "hero": {"offset_top": 0.0, "height": 800.0},
                "profile": {"offset_top": 800.0, "height": 600.0}
            }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(section["active"], "profile");

    // 落在區塊之間時保留目前的區塊
    let gap: Value = client
        .post(format!("{base}/api/sections/active"))
        .json(&json!({
            "scroll_y": 5000.0,
            "viewport_height": 900.0,
            "current": "skills",
            "sections": {"hero": {"offset_top": 0.0, "height": 800.0}}
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(gap["active"], "skills");

    let heading: Value = client
        .post(format!("{base}/api/toc/active"))
        .json(&json!({"headings": [
            {"id": "intro", "top": -400.0},
            {"id": "details", "top": 80.0},
            {"id": "summary", "top": 600.0}
        ]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(heading["active"], "details");
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("site.css"), "body { margin: 0; }").unwrap();

    let base = spawn_site(
        None,
        MemoryPreferenceStore::new(),
        Some(dir.path().to_str().unwrap()),
    )
    .await;

    let response = reqwest::get(format!("{base}/static/site.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "body { margin: 0; }");
}

#[tokio::test]
async fn test_resume_missing_or_empty_is_not_found() {
    const RESUME_LINE: &str = "resume_url = \"https://example.com/jane-doe-resume.pdf\"";

    for replacement in ["", "resume_url = \"\""] {
        let store = fixture_store_with(RESUME_LINE, replacement);
        let base = spawn_site_with_store(store, None, MemoryPreferenceStore::new(), None).await;

        let (_, home) = get_json(&format!("{base}/")).await;
        assert_eq!(home["resume_available"], false, "resume line {replacement:?}");

        let response = reqwest::get(format!("{base}/resume")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["category"], "NotFound");
    }
}
