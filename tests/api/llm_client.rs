use company_scout::services::{CompanyExtractor, ExtractionError, LlmClient};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::helpers::{api_error, chat_completion, extractor_settings};

fn llm_client(server: &MockServer) -> LlmClient {
    LlmClient::new(&extractor_settings(&server.uri()), Some("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn extract_returns_model_text_without_bold_markers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "gemini-1.5-flash" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(
            "**Founding year and founders:** 2010, Jane Doe\n**Headquarters location:** Not Available",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let text = llm_client(&server)
        .extract("Founded 2010 by Jane Doe.\n")
        .await
        .unwrap();

    assert_eq!(
        text,
        "Founding year and founders: 2010, Jane Doe\nHeadquarters location: Not Available"
    );
}

#[tokio::test]
async fn prompt_carries_corpus_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    llm_client(&server).extract("Our mission is rockets.\n").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let content = body["messages"][0]["content"].as_str().unwrap();
    assert!(content.starts_with("Extract the following company details"));
    assert!(content.ends_with("Text:\nOur mission is rockets.\n"));
    assert_eq!(body["messages"][0]["role"], "user");
}

#[tokio::test]
async fn api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(api_error("quota exceeded")))
        .mount(&server)
        .await;

    let result = llm_client(&server).extract("text").await;

    assert!(matches!(result, Err(ExtractionError::Api(_))));
}

#[tokio::test]
async fn empty_choices_are_reported() {
    let server = MockServer::start().await;
    let mut response = chat_completion("unused");
    response["choices"] = json!([]);
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let result = llm_client(&server).extract("text").await;

    assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
}
