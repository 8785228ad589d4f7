/*!
 * HTTP API tests.
 *
 * Each test binds a server to an ephemeral port on localhost with mock
 * provider chains behind it, then talks to it with a real HTTP client.
 */

use std::sync::Arc;

use lexicard::app_controller::Controller;
use lexicard::server::Server;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::common::mock_providers::{working_image_chain, working_translation_chain};
use crate::common::{create_temp_dir, test_config, test_controller};

/// Spawns a server on an ephemeral port and returns its base URL
async fn spawn_server(controller: Controller) -> String {
    let server = Server::bind("127.0.0.1:0", Arc::new(controller))
        .await
        .expect("bind failed");
    let addr = server.local_addr().expect("no local addr");
    tokio::spawn(server.run());
    format!("http://{}", addr)
}

fn default_controller(temp_dir: &TempDir) -> Controller {
    test_controller(
        test_config(temp_dir),
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .expect("controller setup failed")
}

#[tokio::test]
async fn test_getCard_withUnknownId_shouldReturn404WithErrorEnvelope() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;

    let response = reqwest::get(format!("{}/flashcards/999", base))
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_getCard_withNonNumericId_shouldReturn400() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;

    let response = reqwest::get(format!("{}/flashcards/abc", base))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_postThenGet_shouldRoundTripACard() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/flashcards", base))
        .json(&json!({ "word": "book" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["card"]["source_text"], "book");
    assert_eq!(created["card"]["target_text"], "本");
    assert!(created["diagnostics"].as_array().unwrap().is_empty());

    let id = created["card"]["id"].as_i64().unwrap();
    let fetched: Value = reqwest::get(format!("{}/flashcards/{}", base, id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["source_text"], "book");
    assert_eq!(fetched["translation_provider"], "mymemory");
}

#[tokio::test]
async fn test_postCard_acceptsTextFieldAndWordAlias() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;
    let client = reqwest::Client::new();

    let canonical = client
        .post(format!("{}/flashcards", base))
        .json(&json!({ "text": "water" }))
        .send()
        .await
        .unwrap();
    assert_eq!(canonical.status(), 201);
    let created: Value = canonical.json().await.unwrap();
    assert_eq!(created["card"]["source_text"], "water");

    let aliased = client
        .post(format!("{}/flashcards", base))
        .json(&json!({ "word": "drink" }))
        .send()
        .await
        .unwrap();
    assert_eq!(aliased.status(), 201);
}

#[tokio::test]
async fn test_postCard_withMalformedJson_shouldReturn400() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/flashcards", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_postCard_withBlankWord_shouldReturn400() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/flashcards", base))
        .json(&json!({ "word": "  " }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_postCard_duplicateWord_shouldReturn409() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;
    let client = reqwest::Client::new();

    for expected in [201, 409] {
        let response = client
            .post(format!("{}/flashcards", base))
            .json(&json!({ "word": "car" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_postCard_overRateLimit_shouldReturn429() {
    let temp_dir = create_temp_dir().unwrap();
    let mut config = test_config(&temp_dir);
    config.rate_limit.max_actions_per_minute = 1;

    let controller = test_controller(
        config,
        working_image_chain("huggingface"),
        working_translation_chain("mymemory", "本"),
    )
    .unwrap();
    let base = spawn_server(controller).await;
    let client = reqwest::Client::new();

    let first = client
        .post(format!("{}/flashcards", base))
        .json(&json!({ "word": "water" }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/flashcards", base))
        .json(&json!({ "word": "drink" }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 429);
}

#[tokio::test]
async fn test_unknownRoute_shouldReturn404() {
    let temp_dir = create_temp_dir().unwrap();
    let base = spawn_server(default_controller(&temp_dir)).await;

    let response = reqwest::get(format!("{}/decks", base)).await.unwrap();
    assert_eq!(response.status(), 404);
}
