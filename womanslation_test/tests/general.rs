use womanslation_test::prelude::*;

#[tokio::test]
async fn server_can_be_pinged() {
    let server = initialize_test_server().await;

    let response = server.request(Method::GET, "/api/v1/health/ping").send().await;

    response.assert_status_equals(StatusCode::OK);
    response.assert_json_body_matches(ResponseEnvelope {
        success: true,
        message: None,
        data: Some(PingResponse { ok: true }),
    });
}

#[tokio::test]
async fn trailing_slash_is_ignored() {
    let server = initialize_test_server().await;

    let response = server.request(Method::GET, "/api/v1/health/ping/").send().await;

    response.assert_status_equals(StatusCode::OK);
}

#[tokio::test]
async fn malformed_input_is_reported_in_an_envelope() {
    let server = initialize_test_server().await;

    let response = server
        .request(Method::GET, "/api/v1/phrases/not-a-uuid")
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    let envelope = response.envelope::<serde_json::Value>();
    assert!(!envelope.success);
    assert_eq!(envelope.data, None);


    let response = server
        .request(Method::POST, "/api/v1/phrases")
        .with_json_body(serde_json::json!({ "suggested_response": "no text" }))
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    assert!(!response.envelope::<serde_json::Value>().success);
}
