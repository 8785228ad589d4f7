/*!
 * End-to-end card creation tests.
 *
 * These run the whole pipeline (validation, rate limiting, duplicate
 * detection, both fallback chains, image storage, database insert) against
 * an in-memory deck and mock providers.
 */

use lexicard::content::TranslationArtifact;
use lexicard::errors::AppError;
use lexicard::providers::mock::MockProvider;
use lexicard::resolver::LOCAL_PROVIDER;
use lexicard::DuplicatePolicy;

use crate::common::mock_providers::{
    failing_image_chain, failing_translation_chain, sample_translation, translation_chain,
    working_image_chain, working_translation_chain,
};
use crate::common::{create_temp_dir, test_config, test_controller};

#[tokio::test]
async fn test_createCard_withHealthyProviders_shouldStoreRemoteResults() {
    let temp_dir = create_temp_dir().unwrap();
    let controller = test_controller(
        test_config(&temp_dir),
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .unwrap();

    let request = controller.request_for("book", None, vec![]);
    let outcome = controller.create_card(request).await.unwrap();

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.card.source_text, "book");
    assert_eq!(outcome.card.target_text, "本");
    assert_eq!(outcome.card.image_provider, "huggingface");
    assert_eq!(outcome.card.translation_provider, "mymemory");

    // The image artifact landed on disk
    let image_path = outcome.card.image_path.as_deref().unwrap();
    assert!(std::path::Path::new(image_path).exists());
}

#[tokio::test]
async fn test_createCard_withEverythingDown_shouldStillProduceACompleteCard() {
    let temp_dir = create_temp_dir().unwrap();
    let controller = test_controller(
        test_config(&temp_dir),
        failing_image_chain(),
        failing_translation_chain(),
    )
    .unwrap();

    let request = controller.request_for("book", None, vec![]);
    let outcome = controller.create_card(request).await.unwrap();

    // Seed vocabulary supplies the native form to the echo fallback
    assert_eq!(outcome.card.target_text, "本");
    assert_eq!(outcome.card.image_provider, LOCAL_PROVIDER);
    assert_eq!(outcome.card.translation_provider, LOCAL_PROVIDER);

    // 2 translation providers + 3 image providers, one diagnostic each
    assert_eq!(outcome.diagnostics.len(), 5);

    // The stored file is the rendered PNG placeholder
    let image_path = outcome.card.image_path.as_deref().unwrap();
    let bytes = std::fs::read(image_path).unwrap();
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[tokio::test]
async fn test_createCard_withBlankWord_shouldRejectBeforeAnyWork() {
    let temp_dir = create_temp_dir().unwrap();
    let controller = test_controller(
        test_config(&temp_dir),
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .unwrap();

    let request = controller.request_for("   ", None, vec![]);
    let error = controller.create_card(request).await.unwrap_err();

    assert!(matches!(error, AppError::Validation(_)));
    assert_eq!(controller.repository().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_createCard_withRejectPolicy_shouldRefuseSecondCardForSameWord() {
    let temp_dir = create_temp_dir().unwrap();
    let controller = test_controller(
        test_config(&temp_dir),
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .unwrap();

    let first = controller.request_for("book", None, vec![]);
    controller.create_card(first).await.unwrap();

    // Case differences do not evade the duplicate check
    let second = controller.request_for("BOOK", None, vec![]);
    let error = controller.create_card(second).await.unwrap_err();

    assert!(matches!(error, AppError::Duplicate(_)));
    assert_eq!(controller.repository().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_createCard_withAllowPolicy_shouldAcceptRepeats() {
    let temp_dir = create_temp_dir().unwrap();
    let mut config = test_config(&temp_dir);
    config.storage.duplicate_policy = DuplicatePolicy::Allow;

    let controller = test_controller(
        config,
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .unwrap();

    for _ in 0..2 {
        let request = controller.request_for("book", None, vec![]);
        controller.create_card(request).await.unwrap();
    }

    assert_eq!(controller.repository().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_createCard_overRateLimit_shouldRejectWithoutTouchingProviders() {
    let temp_dir = create_temp_dir().unwrap();
    let mut config = test_config(&temp_dir);
    config.rate_limit.max_actions_per_minute = 2;
    config.storage.duplicate_policy = DuplicatePolicy::Allow;

    let provider = MockProvider::working("mymemory", sample_translation("本"));
    let probe = provider.clone();

    let controller = test_controller(
        config,
        working_image_chain("huggingface"),
        translation_chain(vec![Box::new(provider)]),
    )
    .unwrap();

    for _ in 0..2 {
        let request = controller.request_for("book", None, vec![]);
        controller.create_card(request).await.unwrap();
    }

    let request = controller.request_for("book", None, vec![]);
    let error = controller.create_card(request).await.unwrap_err();

    assert!(matches!(error, AppError::RateLimited(_)));
    assert_eq!(probe.attempts(), 2);
    assert_eq!(controller.repository().count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_requestFor_cliHintsOverrideSeedMetadata() {
    let temp_dir = create_temp_dir().unwrap();
    let controller = test_controller(
        test_config(&temp_dir),
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .unwrap();

    let request = controller.request_for(
        "book",
        Some("object".to_string()),
        vec!["library".to_string()],
    );

    assert_eq!(request.category.as_deref(), Some("object"));
    assert_eq!(request.keywords, vec!["library".to_string()]);
    // Seed native form is still attached
    assert_eq!(request.native.as_deref(), Some("本"));
}

#[tokio::test]
async fn test_createCard_partialOutage_recordsWhoActuallyProducedWhat() {
    let temp_dir = create_temp_dir().unwrap();
    let controller = test_controller(
        test_config(&temp_dir),
        failing_image_chain(),
        translation_chain(vec![Box::new(MockProvider::working(
            "llm",
            TranslationArtifact {
                text: "車".to_string(),
                kana: Some("くるま".to_string()),
                romaji: Some("kuruma".to_string()),
            },
        ))]),
    )
    .unwrap();

    let request = controller.request_for("car", None, vec![]);
    let outcome = controller.create_card(request).await.unwrap();

    assert_eq!(outcome.card.translation_provider, "llm");
    assert_eq!(outcome.card.image_provider, LOCAL_PROVIDER);
    assert_eq!(outcome.card.kana.as_deref(), Some("くるま"));
    assert_eq!(outcome.card.romaji.as_deref(), Some("kuruma"));
    assert_eq!(outcome.diagnostics.len(), 3);
}
