/*!
 * App configuration tests
 */

use lexicard::app_config::{
    Config, DuplicatePolicy, ImageProviderKind, LogLevel, TranslationProviderKind,
};

use crate::common::create_temp_dir;

#[test]
fn test_defaultConfig_shouldTargetJapanese() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ja");
    assert_eq!(config.target_language_name(), "Japanese");
}

#[test]
fn test_defaultConfig_shouldCarryFullProviderChains() {
    let config = Config::default();

    assert_eq!(
        config.image.order,
        vec![
            ImageProviderKind::HuggingFace,
            ImageProviderKind::Pixabay,
            ImageProviderKind::Unsplash,
        ]
    );
    assert_eq!(
        config.translation.order,
        vec![
            TranslationProviderKind::MyMemory,
            TranslationProviderKind::Llm,
        ]
    );
}

#[test]
fn test_saveAndReload_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "fr".to_string();
    config.rate_limit.max_actions_per_minute = 3;
    config.storage.duplicate_policy = DuplicatePolicy::Allow;
    config.save(&path).unwrap();

    let reloaded = Config::from_file(&path).unwrap();

    assert_eq!(reloaded.target_language, "fr");
    assert_eq!(reloaded.rate_limit.max_actions_per_minute, 3);
    assert_eq!(reloaded.storage.duplicate_policy, DuplicatePolicy::Allow);
}

#[test]
fn test_fromFile_withMissingFile_shouldError() {
    let temp_dir = create_temp_dir().unwrap();
    let result = Config::from_file(temp_dir.path().join("nope.json"));
    assert!(result.is_err());
}

#[test]
fn test_fromFile_withInvalidEndpoint_shouldFailValidation() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    std::fs::write(
        &path,
        r#"{ "translation": { "mymemory_endpoint": "definitely not a url" } }"#,
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_minimalFile_shouldFillEveryDefault() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");
    std::fs::write(&path, "{}").unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.rate_limit.max_actions_per_minute, 5);
    assert_eq!(config.server.bind, "127.0.0.1:8000");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.storage.duplicate_policy, DuplicatePolicy::Reject);
}
