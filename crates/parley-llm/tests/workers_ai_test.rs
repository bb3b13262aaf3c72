use mockito::Matcher;
use parley_llm::{InferenceClient, InferenceOptions, InferenceRequest, WorkersAiClient};
use serde_json::json;

const MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";
const RUN_PATH: &str = "/accounts/acc/ai/run/@cf/meta/llama-3.3-70b-instruct-fp8-fast";

fn client_for(server: &mockito::ServerGuard) -> WorkersAiClient {
    WorkersAiClient::builder()
        .account_id("acc")
        .api_token("secret-token")
        .base_url(server.url())
        .build()
        .unwrap()
}

fn request() -> InferenceRequest {
    InferenceRequest::new(MODEL, "Say hi")
        .with_options(InferenceOptions::new().max_tokens(120).temperature(0.25))
}

#[tokio::test]
async fn test_run_returns_response_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", RUN_PATH)
        .match_header("authorization", "Bearer secret-token")
        .match_body(Matcher::PartialJson(json!({
            "prompt": "Say hi",
            "max_tokens": 120,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "result": {
                    "response": "Hello!",
                    "usage": { "prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5 }
                },
                "success": true,
                "errors": [],
                "messages": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let output = client_for(&server).run(request()).await.unwrap();

    assert_eq!(output.response, "Hello!");
    assert_eq!(output.usage.map(|u| u.total_tokens), Some(5));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", RUN_PATH)
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = client_for(&server).run(request()).await.unwrap_err();
    let msg = err.to_string();

    assert!(msg.contains("500"), "unexpected error: {msg}");
    assert!(msg.contains("upstream exploded"), "unexpected error: {msg}");
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", RUN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "result": null,
                "success": false,
                "errors": [{ "code": 5007, "message": "No such model" }],
                "messages": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client_for(&server).run(request()).await.unwrap_err();
    assert!(err.to_string().contains("No such model"));
}

#[tokio::test]
async fn test_missing_response_field_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", RUN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "result": {}, "success": true, "errors": [] }).to_string())
        .create_async()
        .await;

    let err = client_for(&server).run(request()).await.unwrap_err();
    assert!(err.to_string().contains("response"));
}

#[test]
fn test_builder_missing_account_id() {
    let result = WorkersAiClient::builder().api_token("token").build();

    let err_msg = result.err().unwrap().to_string();
    assert!(err_msg.contains("Account ID"));
}

#[test]
fn test_builder_missing_api_token() {
    let result = WorkersAiClient::builder().account_id("acc").build();

    let err_msg = result.err().unwrap().to_string();
    assert!(err_msg.contains("API token"));
}
