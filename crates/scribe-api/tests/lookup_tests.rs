use axum::http::StatusCode;
use scribe_api::question::model::LookupResponse;
use serde_json::json;

use crate::common::TestClient;

#[tokio::test]
async fn test_fuzzy_finds_close_response() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-dog/fuzzy",
            &json!({ "submission": "The dog ran quikly." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let lookup: LookupResponse = response.json();
    assert_eq!(lookup.response.unwrap().id.as_str(), "d1");
}

#[tokio::test]
async fn test_fuzzy_returns_null_when_nothing_is_close() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-although/fuzzy",
            &json!({ "submission": "Penguins cannot fly." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let json: serde_json::Value = response.json();
    assert!(json["response"].is_null());
}

#[tokio::test]
async fn test_typo_matches_feedback_record() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-although/typo",
            &json!({ "submission": "It was rainng, but the children played outside." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let lookup: LookupResponse = response.json();
    let found = lookup.response.unwrap();
    assert_eq!(found.id.as_str(), "r1");
    assert_eq!(found.feedback.as_deref(), Some("Use the word \"although\"."));
}

#[tokio::test]
async fn test_lookup_unknown_question() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json("/v1/questions/missing/typo", &json!({ "submission": "x" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
