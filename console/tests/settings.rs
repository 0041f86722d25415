//! Settings persistence tests

use lang_console::errors::ConsoleError;
use lang_console::logs::LogLevel;
use lang_console::storage::layout::StorageLayout;
use lang_console::storage::settings::Settings;
use secrecy::{ExposeSecret, SecretString};

#[tokio::test]
async fn test_save_round_trip_never_writes_token() {
    let dir = tempfile::tempdir().unwrap();
    let layout = StorageLayout::new(dir.path());
    let file = layout.settings_file();

    let mut settings = Settings::default();
    settings.backend.base_url = "https://api.lang.dev/api/v1".to_string();
    settings.log_level = LogLevel::Debug;
    settings.session.token = Some(SecretString::from("secret".to_string()));
    settings.save(&file).await.unwrap();

    let text = file.read_string().await.unwrap();
    assert!(!text.contains("secret"));

    let loaded = Settings::load(&file).await.unwrap();
    assert_eq!(loaded.backend.base_url, "https://api.lang.dev/api/v1");
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert!(loaded.session.token.is_none());
}

#[tokio::test]
async fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let layout = StorageLayout::new(dir.path().join("nested"));

    let settings = Settings::load(&layout.settings_file()).await.unwrap();
    assert_eq!(settings.backend.base_domain, "localhost");
    assert_eq!(
        settings.backend.resolved_auth_base_url(),
        "http://localhost:3000/api/v1/auth"
    );
}

#[tokio::test]
async fn test_invalid_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let layout = StorageLayout::new(dir.path());
    tokio::fs::write(layout.settings_file().path(), "{ not json")
        .await
        .unwrap();

    let err = Settings::load(&layout.settings_file()).await.unwrap_err();
    assert!(matches!(err, ConsoleError::ConfigError(_)));
}

#[test]
fn test_env_overrides() {
    let mut settings = Settings::default();
    settings
        .apply_env(|key| match key {
            "VITE_API_BASE_URL" => Some("https://api.lang.dev/api/v1".to_string()),
            "LANG_SESSION_TOKEN" => Some("tok".to_string()),
            "LANG_LOG_LEVEL" => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(settings.backend.base_url, "https://api.lang.dev/api/v1");
    assert_eq!(
        settings.session.token.as_ref().map(|t| t.expose_secret().to_string()),
        Some("tok".to_string())
    );
    assert_eq!(settings.log_level, LogLevel::Warn);

    let options = settings.client_options();
    assert_eq!(options.auth_base_url, "https://api.lang.dev/api/v1/auth");

    let err = settings
        .apply_env(|key| (key == "LANG_LOG_LEVEL").then(|| "loud".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConsoleError::ConfigError(_)));
}
