use std::fs;
use std::time::Duration;

use quiz_oracle::config::ConfigStore;
use quiz_oracle::llm::{answer_question, test_configured_api_key};
use quiz_oracle::{Question, QuestionOption, QuestionType};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(server: &MockServer, timeout_secs: u64) -> (TempDir, ConfigStore) {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let config = json!({
        "ai_config": {
            "api_key": "sk-test",
            "base_url": server.uri(),
            "timeout_secs": timeout_secs,
        }
    });
    fs::write(&config_path, config.to_string()).unwrap();
    (dir, ConfigStore::new(config_path))
}

fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 3, "total_tokens": 45}
    })
}

fn lettered(kind: QuestionType, count: usize) -> Question {
    let options = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .take(count)
        .map(|key| QuestionOption::new(*key, format!("choice {key}")))
        .collect();
    Question::new(kind, "Which ones?", options)
}

#[tokio::test]
async fn multiple_choice_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "deepseek-chat", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("B，C")))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = write_config(&server, 5);
    let answer = answer_question(&store, &lettered(QuestionType::MultipleChoice, 6)).await;
    assert_eq!(answer.keys(), ["B", "C"]);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");
    assert!(messages[1]["content"].as_str().unwrap().contains("F: choice F"));
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.15).abs() < 1e-6);
}

#[tokio::test]
async fn single_choice_keeps_first_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("B, A")))
        .mount(&server)
        .await;

    let (_dir, store) = write_config(&server, 5);
    let answer = answer_question(&store, &lettered(QuestionType::SingleChoice, 2)).await;
    assert_eq!(answer.keys(), ["B"]);
}

#[tokio::test]
async fn rejected_credentials_give_empty_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Authentication Fails, Your api key is invalid",
                "type": "authentication_error",
                "param": null,
                "code": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let (_dir, store) = write_config(&server, 5);
    let answer = answer_question(&store, &lettered(QuestionType::MultipleChoice, 4)).await;
    assert!(answer.is_empty());
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("A"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (_dir, store) = write_config(&server, 1);
    let answer = answer_question(&store, &lettered(QuestionType::Poll, 3)).await;
    assert!(answer.is_empty());
}

#[tokio::test]
async fn blank_reply_gives_empty_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  ")))
        .mount(&server)
        .await;

    let (_dir, store) = write_config(&server, 5);
    let answer = answer_question(&store, &lettered(QuestionType::SingleChoice, 2)).await;
    assert!(answer.is_empty());
}

#[tokio::test]
async fn api_key_check_lists_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "deepseek-chat", "object": "model", "created": 0, "owned_by": "deepseek"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, store) = write_config(&server, 5);
    assert!(test_configured_api_key(&store).await.is_ok());
}

#[tokio::test]
async fn request_goes_out_without_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("A")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        json!({"ai_config": {"base_url": server.uri()}}).to_string(),
    )
    .unwrap();

    let store = ConfigStore::new(config_path);
    let answer = answer_question(&store, &lettered(QuestionType::SingleChoice, 2)).await;
    assert_eq!(answer.keys(), ["A"]);
}
