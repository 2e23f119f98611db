// Test the Gemini provider against a mock generateContent endpoint
//
// Verifies that:
// 1. Priming turns, history and the live message go out in order
// 2. Generation parameters and safety thresholds are attached
// 3. Safety blocks surface as ContentBlocked through the bridge
// 4. Transport and API failures surface as Internal

use mockito::Matcher;
use pantera::bridge::{build_turns, send_message, HistoryEntry, Priming};
use pantera::errors::ChatError;
use pantera::providers::{ChatModel, GeminiProvider};
use serde_json::json;

const MODEL_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

fn provider(server: &mockito::ServerGuard) -> GeminiProvider {
    GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url())
}

fn priming() -> Priming {
    Priming::new("CONTEXTO", "Entendido!")
}

#[tokio::test]
async fn test_request_shape_and_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", MODEL_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "CONTEXTO"}]},
                {"role": "model", "parts": [{"text": "Entendido!"}]},
                {"role": "user", "parts": [{"text": "oi"}]},
                {"role": "model", "parts": [{"text": "Olá!"}]},
                {"role": "user", "parts": [{"text": "quem é o coach?"}]}
            ],
            "generationConfig": {"topK": 1, "maxOutputTokens": 256},
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "O coach é o sidde! 🐾"}]},
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let history = vec![
        HistoryEntry {
            sender: "user".into(),
            text: "oi".into(),
        },
        HistoryEntry {
            sender: "bot".into(),
            text: "Olá!".into(),
        },
        HistoryEntry {
            sender: "user".into(),
            text: "quem é o coach?".into(),
        },
    ];
    let turns = build_turns(&priming(), &history);
    let reply = send_message(&provider(&server), &turns, "quem é o coach?")
        .await
        .unwrap();

    assert_eq!(reply, "O coach é o sidde! 🐾");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_safety_finish_reason_is_content_blocked() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(json!({"candidates": [{"finishReason": "SAFETY"}]}).to_string())
        .create_async()
        .await;

    let turns = build_turns(&priming(), &[]);
    let err = send_message(&provider(&server), &turns, "algo ruim")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::ContentBlocked));
}

#[tokio::test]
async fn test_prompt_block_is_content_blocked() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", MODEL_PATH)
        .with_status(200)
        .with_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string())
        .create_async()
        .await;

    let turns = build_turns(&priming(), &[]);
    let err = send_message(&provider(&server), &turns, "algo ruim")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::ContentBlocked));
}

#[tokio::test]
async fn test_api_error_is_internal() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", MODEL_PATH)
        .with_status(500)
        .with_body(r#"{"error": {"code": 500, "message": "backend error"}}"#)
        .create_async()
        .await;

    let turns = build_turns(&priming(), &[]);
    let err = send_message(&provider(&server), &turns, "oi")
        .await
        .unwrap_err();
    match err {
        ChatError::Internal(e) => assert!(format!("{:#}", e).contains("500")),
        other => panic!("expected Internal, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_internal() {
    let provider = GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_base_url("http://127.0.0.1:9/v1beta");

    let turns = build_turns(&priming(), &[]);
    let err = send_message(&provider, &turns, "oi").await.unwrap_err();
    assert!(matches!(err, ChatError::Internal(_)));
}

#[tokio::test]
async fn test_transport_error_does_not_leak_api_key() {
    let provider = GeminiProvider::new("SUPER-SECRET-KEY".to_string())
        .unwrap()
        .with_base_url("http://127.0.0.1:9/v1beta");

    let turns = build_turns(&priming(), &[]);
    let err = send_message(&provider, &turns, "oi").await.unwrap_err();
    // Same rendering the chat handler logs.
    let logged = format!("{:#}", err);
    assert!(logged.contains("generateContent"), "{}", logged);
    assert!(!logged.contains("SUPER-SECRET-KEY"), "{}", logged);
}

#[test]
fn test_gemini_provider_identity() {
    let provider = GeminiProvider::new("test-key".to_string())
        .unwrap()
        .with_model("gemini-2.0-flash");

    assert_eq!(provider.name(), "gemini");
    assert_eq!(provider.model(), "gemini-2.0-flash");
    assert_eq!(provider.generation_config().max_output_tokens, 256);
    assert_eq!(provider.safety_settings().len(), 4);
}
