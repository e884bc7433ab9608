//! HTTP generator tests against a mock OpenAI-compatible server.

use crate::actors::llm::OpenAiCompatClient;
use crate::actors::traits::{ReplyGenerator, SummaryGenerator};
use crate::brain::Emotion;
use crate::config::GeneratorConfig;
use crate::error::AppError;
use crate::memory::ConversationWindow;
use crate::prompts::SUMMARY_INSTRUCTIONS;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiCompatClient {
    OpenAiCompatClient::new(&GeneratorConfig {
        base_url: format!("{}/", server.uri()),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        temperature: 0.3,
    })
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "cmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_reply_request_shape_and_response() {
    // 1. Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "messages": [
                { "role": "system" },
                { "role": "user" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Yes! Big car!  ")))
        .expect(1)
        .mount(&server)
        .await;

    let request = ConversationWindow::default().reply_request("car", Emotion::Happy);

    // 2. Act
    let reply = client_for(&server).generate_reply(request).await;

    // 3. Assert
    assert_eq!(reply.unwrap(), "Yes! Big car!");
}

#[tokio::test]
async fn test_summary_is_sent_as_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": SUMMARY_INSTRUCTIONS },
                { "role": "user", "content": "Summarize please" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("A short session.")))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server)
        .generate_summary("Summarize please".to_string())
        .await
        .unwrap();
    assert_eq!(summary, "A short session.");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert!(!system.contains("1-4 words"));
    assert!(!system.starts_with("You are CHAT"));
}

#[tokio::test]
async fn test_server_error_is_generator_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let request = ConversationWindow::default().reply_request("dog", Emotion::Happy);
    let result = client_for(&server).generate_reply(request).await;

    if let Err(AppError::Generator(msg)) = result {
        assert!(msg.contains("status 500"));
        assert!(msg.contains("Internal Server Error"));
    } else {
        panic!("Expected AppError::Generator, got {:?}", result);
    }
}

#[tokio::test]
async fn test_empty_choices_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let request = ConversationWindow::default().reply_request("dog", Emotion::Happy);
    let result = client_for(&server).generate_reply(request).await;
    assert!(matches!(result, Err(AppError::Generator(_))));
}
