mod common;

use common::spawn_site;
use portfolio_site::adapters::storage::FilePreferenceStore;
use portfolio_site::config::LogFormat;
use portfolio_site::core::theme::{ColorScheme, Theme, ThemeController, THEME_KEY};
use portfolio_site::domain::ports::{ConfigProvider, PreferenceStore};
use portfolio_site::utils::validation::Validate;
use portfolio_site::SiteConfig;
use serde_json::Value;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[tokio::test]
async fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs").join("preferences.json");

    {
        let store = FilePreferenceStore::new(&path);
        let mut controller = ThemeController::load(store, ColorScheme::Light).await;
        assert_eq!(controller.theme(), Theme::System);
        controller.set(Theme::Dark).await.unwrap();
    }

    let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw[THEME_KEY], "dark");

    let controller = ThemeController::load(FilePreferenceStore::new(&path), ColorScheme::Light).await;
    assert_eq!(controller.theme(), Theme::Dark);
    assert_eq!(controller.applied(), ColorScheme::Dark);
}

#[tokio::test]
async fn test_site_writes_theme_to_preferences_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    let base = spawn_site(None, FilePreferenceStore::new(&path), None).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/theme/cycle"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let store = FilePreferenceStore::new(&path);
    assert_eq!(store.read(THEME_KEY).await.unwrap().as_deref(), Some("light"));
}

#[tokio::test]
async fn test_unreadable_preferences_fall_back_to_system() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let controller = ThemeController::load(FilePreferenceStore::new(&path), ColorScheme::Dark).await;
    assert_eq!(controller.theme(), Theme::System);
    assert_eq!(controller.applied(), ColorScheme::Dark);
}

#[tokio::test]
async fn test_theme_changes_recover_corrupt_preferences_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let mut controller =
        ThemeController::load(FilePreferenceStore::new(&path), ColorScheme::Light).await;
    assert_eq!(controller.theme(), Theme::System);

    assert_eq!(controller.set(Theme::Dark).await.unwrap(), ColorScheme::Dark);
    assert_eq!(controller.cycle().await.unwrap(), Theme::System);
    assert_eq!(controller.theme(), Theme::System);

    let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw[THEME_KEY], "system");

    let reloaded = ThemeController::load(FilePreferenceStore::new(&path), ColorScheme::Light).await;
    assert_eq!(reloaded.theme(), Theme::System);
}

#[tokio::test]
async fn test_site_theme_endpoints_rewrite_corrupt_preferences_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, b"{ not json").unwrap();
    let base = spawn_site(None, FilePreferenceStore::new(&path), None).await;

    let response = reqwest::Client::new()
        .put(format!("{base}/api/theme"))
        .json(&serde_json::json!({"theme": "dark"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let store = FilePreferenceStore::new(&path);
    assert_eq!(store.read(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_site_config_file_with_env_placeholders() {
    std::env::set_var("PORTFOLIO_IT_STATIC_DIR", "/srv/portfolio/dist");

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[server]
bind_address = "0.0.0.0:8081"
static_dir = "${PORTFOLIO_IT_STATIC_DIR}"

[chat]
enabled = false

[logging]
format = "json"
"#,
    )
    .unwrap();

    let config = SiteConfig::load(file.path()).unwrap();
    assert_eq!(config.bind_address(), "0.0.0.0:8081");
    assert_eq!(config.server.static_dir.as_deref(), Some("/srv/portfolio/dist"));
    assert!(!config.chat_enabled());
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());

    std::env::remove_var("PORTFOLIO_IT_STATIC_DIR");
}

#[test]
fn test_sample_configuration_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/portfolio.toml");
    let config = SiteConfig::load(path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.chat_model(), "gemini-2.5-flash");
}
