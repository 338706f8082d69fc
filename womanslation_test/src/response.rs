use std::fmt::Debug;

use actix_http::StatusCode;
use actix_web::{dev::ServiceResponse, test, web::Bytes};
use serde::de::DeserializeOwned;
use womanslation_core::api_models::ResponseEnvelope;

pub struct TestResponse {
    status: StatusCode,
    body_bytes: Bytes,
}

impl TestResponse {
    pub(crate) async fn from_service_response(response: ServiceResponse) -> Self {
        let status = response.status();
        let body_bytes = test::read_body(response).await;

        Self { status, body_bytes }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn assert_status_equals(&self, status_code: StatusCode) {
        assert_eq!(
            self.status,
            status_code,
            "unexpected status, body: {}",
            String::from_utf8_lossy(&self.body_bytes)
        );
    }

    pub fn json_body<D>(&self) -> D
    where
        D: DeserializeOwned,
    {
        serde_json::from_slice::<D>(&self.body_bytes).expect("failed to deserialize body as JSON")
    }

    pub fn envelope<D>(&self) -> ResponseEnvelope<D>
    where
        D: DeserializeOwned,
    {
        self.json_body::<ResponseEnvelope<D>>()
    }

    /// Asserts a successful envelope and returns its `data`.
    pub fn success_data<D>(&self) -> D
    where
        D: DeserializeOwned,
    {
        let envelope = self.envelope::<D>();
        assert!(envelope.success, "envelope is not successful");

        envelope.data.expect("successful envelope carries no data")
    }

    /// Asserts a failed envelope (`success: false`, `data: null`) with the given message.
    pub fn assert_failure_message(&self, expected_message: &str) {
        let envelope = self.envelope::<serde_json::Value>();

        assert!(!envelope.success);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.message.as_deref(), Some(expected_message));
    }

    pub fn assert_json_body_matches<D>(&self, expected_content: D)
    where
        D: DeserializeOwned + PartialEq + Debug,
    {
        assert_eq!(self.json_body::<D>(), expected_content);
    }
}
