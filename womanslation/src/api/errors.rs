//! Provides ways of handling errors in API endpoint functions
//! and ways to have those errors automatically turned into correct
//! HTTP error responses when returned as `Err(error)` from those functions.
//!
//! Every error response carries the usual response envelope with
//! `success: false` and a human-readable `message`.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mime::Mime;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use womanslation_core::{api_models::ResponseEnvelope, validation::ValidationError};
use womanslation_database::{
    store::{DuplicateKind, NotFoundKind, StoreError},
    QueryError,
};


/// Message sent in place of any internal error, which is never leaked through the API.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";


/// General-purpose Womanslation API error type.
///
/// Use this type alongside an [`EndpointResult`] return type in your actix endpoint handlers
/// to allow you to easily `?`-return errors and have them automatically converted
/// into HTTP 4xx and 5xx responses. Store errors convert into this type directly:
///
/// ```no_run
/// # use actix_web::{get, web};
/// # use womanslation::api::errors::{EndpointResponseBuilder, EndpointResult};
/// # use womanslation::state::ApplicationState;
/// # use womanslation_core::{api_models::ResponseEnvelope, id::PhraseId, voter::VoterIp};
/// # use womanslation_database::store::PhraseStore;
/// #[get("/{phrase_id}")]
/// async fn example(state: ApplicationState, phrase_id: web::Path<PhraseId>) -> EndpointResult {
///     let mut database_connection = state.acquire_database_connection().await?;
///
///     // Responds with `404 Not Found` if the phrase does not exist.
///     let phrase = PhraseStore::get_by_id(
///         &mut database_connection,
///         phrase_id.into_inner(),
///         &VoterIp::new("1.2.3.4"),
///     )
///     .await?;
///
///     # todo!();
/// }
/// ```
#[derive(Debug, Error)]
pub enum EndpointError {
    /*
     * Client errors.
     *
     * Their messages are sent along in the response.
     */
    /// The request could not be parsed: invalid JSON body, malformed path
    /// parameter (e.g. a UUID) or invalid query string.
    InvalidRequest { reason: Cow<'static, str> },

    /// A field of a well-formed request violates its constraints.
    Validation {
        #[from]
        #[source]
        error: ValidationError,
    },

    Duplicate { kind: DuplicateKind },

    NotFound { kind: NotFoundKind },

    /*
     * Server errors.
     *
     * Reasons are not shown externally.
     */
    /// Internal error with a string reason.
    /// Triggers a `500 Internal Server Error` (**reason doesn't leak through the API**).
    InternalErrorWithReason { reason: Cow<'static, str> },

    /// Internal error, constructed from a boxed [`Error`](std::error::Error).
    /// Triggers a `500 Internal Server Error` (**error doesn't leak through the API**).
    InternalGenericError {
        #[source]
        error: Box<dyn std::error::Error>,
    },

    /// Internal error, constructed from a [`sqlx::Error`].
    /// Triggers a `500 Internal Server Error` (*doesn't leak the error through the API*).
    InternalDatabaseError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    InvalidDatabaseState { problem: Cow<'static, str> },
}

impl EndpointError {
    #[inline]
    pub fn invalid_request<S>(reason: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn internal_error<E>(error: E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::InternalGenericError {
            error: Box::new(error),
        }
    }

    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::InternalErrorWithReason { .. }
                | Self::InternalGenericError { .. }
                | Self::InternalDatabaseError { .. }
                | Self::InvalidDatabaseState { .. }
        )
    }

    /// The message that is sent to the caller.
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            INTERNAL_SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest { reason } => write!(f, "{reason}"),
            Self::Validation { error } => write!(f, "{error}"),
            Self::Duplicate { kind } => write!(f, "{kind}"),
            Self::NotFound { kind } => write!(f, "{kind}"),
            Self::InternalErrorWithReason { reason } => write!(
                f,
                "Internal server error (with reason): {reason}."
            ),
            Self::InternalGenericError { error } => {
                write!(f, "Internal server error (generic): {error:?}")
            }
            Self::InternalDatabaseError { error } => {
                write!(
                    f,
                    "Internal server error (database error): {error}."
                )
            }
            Self::InvalidDatabaseState { problem } => {
                write!(
                    f,
                    "Inconsistent internal database state: {problem}"
                )
            }
        }
    }
}

impl ResponseError for EndpointError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Duplicate { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InternalErrorWithReason { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalGenericError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalDatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidDatabaseState { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if self.is_internal() {
            error!(error = %self, "Responding with an internal server error.");
        }

        EndpointResponseBuilder::new(self.status_code())
            .with_json_body(ResponseEnvelope::failure(self.public_message()))
            .build()
            .unwrap_or_else(|_| HttpResponse::InternalServerError().finish())
    }
}


impl From<QueryError> for EndpointError {
    fn from(value: QueryError) -> Self {
        match value {
            QueryError::SqlxError { error } => Self::InternalDatabaseError { error },
            QueryError::ModelError { reason } => Self::InternalErrorWithReason { reason },
            QueryError::DatabaseInconsistencyError { problem } => {
                Self::InvalidDatabaseState { problem }
            }
        }
    }
}

impl From<StoreError> for EndpointError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(error) => Self::Validation { error },
            StoreError::Duplicate(kind) => Self::Duplicate { kind },
            StoreError::NotFound(kind) => Self::NotFound { kind },
            StoreError::Persistence(error) => Self::from(error),
        }
    }
}

impl From<JsonPayloadError> for EndpointError {
    fn from(value: JsonPayloadError) -> Self {
        match value {
            JsonPayloadError::ContentType => {
                Self::invalid_request("Expected a JSON body (Content-Type: application/json).")
            }
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                Self::invalid_request("Invalid JSON body: too large.")
            }
            JsonPayloadError::Deserialize(error) => {
                Self::invalid_request(format!("Invalid JSON body: {error}"))
            }
            other => Self::invalid_request(format!("Invalid JSON body: {other}")),
        }
    }
}

impl From<PathError> for EndpointError {
    fn from(value: PathError) -> Self {
        match value {
            PathError::Deserialize(error) => {
                Self::invalid_request(format!("Invalid path parameter: {error}"))
            }
            other => Self::invalid_request(format!("Invalid path parameter: {other}")),
        }
    }
}

impl From<QueryPayloadError> for EndpointError {
    fn from(value: QueryPayloadError) -> Self {
        match value {
            QueryPayloadError::Deserialize(error) => {
                Self::invalid_request(format!("Invalid query parameters: {error}"))
            }
            other => Self::invalid_request(format!("Invalid query parameters: {other}")),
        }
    }
}




pub struct EndpointResponseBuilder {
    status_code: StatusCode,

    body: Option<Result<Vec<u8>, serde_json::Error>>,

    content_type: Option<Mime>,
}

impl EndpointResponseBuilder {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            body: None,
            content_type: None,
        }
    }

    #[inline]
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    pub fn with_json_body<S>(self, data: S) -> Self
    where
        S: Serialize,
    {
        let body = serde_json::to_vec(&data);

        Self {
            status_code: self.status_code,
            body: Some(body),
            content_type: Some(mime::APPLICATION_JSON),
        }
    }

    /// Shorthand for a successful envelope carrying `data` and a `message`.
    pub fn with_data_and_message<S, M>(self, message: M, data: S) -> Self
    where
        S: Serialize,
        M: Into<String>,
    {
        self.with_json_body(ResponseEnvelope::success_with_message(
            message, data,
        ))
    }

    pub fn build(self) -> Result<HttpResponse<BoxBody>, EndpointError> {
        let optional_body = match self.body {
            Some(body_or_error) => match body_or_error {
                Ok(body) => Some(body),
                Err(serialization_error) => {
                    return Err(EndpointError::internal_error(serialization_error))
                }
            },
            None => None,
        };


        let mut response_builder = HttpResponse::build(self.status_code);

        if let Some(content_type) = self.content_type {
            response_builder.insert_header(header::ContentType(content_type));
        }


        match optional_body {
            Some(body) => response_builder
                .message_body(body.boxed())
                .map_err(EndpointError::internal_error),
            None => response_builder
                .message_body(().boxed())
                .map_err(EndpointError::internal_error),
        }
    }
}




/// Short for [`Result`]`<`[`HttpResponse`]`, `[`EndpointError`]`>`, intended to be used in most
/// places in handlers of the Womanslation API.
pub type EndpointResult<Body = BoxBody> = Result<HttpResponse<Body>, EndpointError>;



#[cfg(test)]
mod test {
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    use super::*;

    async fn response_json(error: EndpointError) -> (StatusCode, Value) {
        let response = error.error_response();
        let status = response.status();

        let body = to_bytes(response.into_body()).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn not_found_renders_as_envelope() {
        let (status, body) = response_json(EndpointError::from(StoreError::not_found(
            NotFoundKind::Phrase,
        )))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Phrase not found!", "data": null })
        );
    }

    #[actix_web::test]
    async fn duplicates_and_validation_failures_are_bad_requests() {
        let (status, body) = response_json(EndpointError::from(StoreError::duplicate(
            DuplicateKind::MeaningAndTone,
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Meaning already exists in the database");

        let (status, body) = response_json(EndpointError::from(StoreError::from(
            ValidationError::PhraseTextTooShort,
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Phrase must be a string and at least 3 characters long"
        );
    }

    #[actix_web::test]
    async fn internal_errors_do_not_leak() {
        let (status, body) = response_json(EndpointError::from(StoreError::from(
            QueryError::database_inconsistency("meaning without a phrase"),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Internal server error", "data": null })
        );
    }

    #[test]
    fn unparsable_path_parameters_are_bad_requests() {
        let error = EndpointError::invalid_request("Invalid path parameter: bad UUID");

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "Invalid path parameter: bad UUID");
    }

    #[actix_web::test]
    async fn builder_sets_json_content_type() {
        let response = EndpointResponseBuilder::ok()
            .with_data_and_message("Phrase viewed successfully", json!({ "views": 1 }))
            .build()
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body: Value = serde_json::from_slice(&to_bytes(response.into_body()).await.unwrap())
            .unwrap();

        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Phrase viewed successfully",
                "data": { "views": 1 }
            })
        );
    }
}
