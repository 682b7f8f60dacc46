use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::{TestClient, TestStateBuilder, app};

#[tokio::test]
async fn test_classify_exact_match_returns_existing_record() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-although/classify",
            &json!({ "submission": "  Although it was raining,  the children played outside. " }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["found"], true);
    assert_eq!(json["outcome"]["rule"], "exact");
    assert_eq!(json["response"]["kind"], "existing");
    assert_eq!(json["response"]["id"], "o1");
    assert_eq!(json["response"]["count"], 10);
    assert_eq!(
        json["submitted"],
        "Although it was raining, the children played outside."
    );
}

#[tokio::test]
async fn test_classify_case_error_returns_candidate() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-dog/classify",
            &json!({ "submission": "the dog ran quickly." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["found"], true);
    assert_eq!(json["outcome"]["rule"], "case_insensitive");
    assert_eq!(json["response"]["kind"], "candidate");
    assert_eq!(json["response"]["author"], "Capitalization Hint");
    assert_eq!(json["response"]["parent_id"], "d1");
    assert_eq!(json["response"]["question_id"], "q-dog");
    assert_eq!(json["response"]["count"], 1);
    assert_eq!(json["response"]["concept_results"][0]["correct"], false);
}

#[tokio::test]
async fn test_classify_change_object() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-dog/classify",
            &json!({ "submission": "The dog ran quick." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["outcome"]["rule"], "change_object");
    assert_eq!(json["outcome"]["mode"], "rigid");
    assert_eq!(json["outcome"]["kind"], "INCORRECT_WORD");
    assert_eq!(json["response"]["author"], "Modified Word Hint");
}

#[tokio::test]
async fn test_classify_focus_point() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-although/classify",
            &json!({ "submission": "Although it was raining, the kids played outside." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["outcome"]["rule"], "focus_point");
    assert_eq!(json["response"]["feedback"], "Who played outside?");
    assert_eq!(json["response"]["author"], "Focus Point Hint");
    assert_eq!(json["response"]["parent_id"], "o1");
}

#[tokio::test]
async fn test_classify_unmatched() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/q-dog/classify",
            &json!({ "submission": "My uncle repairs bicycles." }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["found"], false);
    assert_eq!(json["outcome"]["rule"], "unmatched");
    assert_eq!(json["response"]["kind"], "candidate");
    assert_eq!(json["response"]["text"], "My uncle repairs bicycles.");
    assert!(json["response"].get("feedback").is_none());
}

#[tokio::test]
async fn test_classify_unknown_question() {
    let client = TestClient::with_defaults();

    let response = client
        .post_json(
            "/v1/questions/missing/classify",
            &json!({ "submission": "Anything." }),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_classify_rejects_long_submission() {
    let client = TestClient::new(app(TestStateBuilder::new().max_submission_chars(10).build()));

    let response = client
        .post_json(
            "/v1/questions/q-dog/classify",
            &json!({ "submission": "The dog ran quickly." }),
        )
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = response.json();
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("at most 10 characters")
    );
}

#[tokio::test]
async fn test_classify_keeps_client_request_id() {
    let client = TestClient::with_defaults();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/questions/q-dog/classify")
        .header("content-type", "application/json")
        .header("x-request-id", "classify-77")
        .body(axum::body::Body::from(
            json!({ "submission": "the dog ran quickly." }).to_string(),
        ))
        .unwrap();

    let response = client.request(request).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.header("x-request-id"), Some("classify-77"));
    let json: Value = response.json();
    assert_eq!(json["outcome"]["rule"], "case_insensitive");
}
