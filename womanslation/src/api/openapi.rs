//! [`utoipa`] (OpenAPI) response annotations shared by Womanslation endpoints.
//!
//! Every type here implements [`utoipa::IntoResponses`], so it can be listed
//! directly inside the `responses` section of a [`utoipa::path`] annotation:
//! ```no_run
//! use womanslation::api::errors::EndpointResult;
//! use womanslation::api::openapi::InternalServerError;
//!
//! #[utoipa::path(
//!     post,
//!     path = "/",
//!     responses(
//!         InternalServerError
//!     )
//! )]
//! #[actix_web::post("/")]
//! pub async fn foo_bar() -> EndpointResult {
//!     todo!();
//! }
//! ```
//!
//! **It is fully up to your endpoint implementation to ensure
//! what you annotate it with actually happens.**

use std::collections::BTreeMap;

use serde_json::json;
use utoipa::openapi::{ContentBuilder, RefOr, Response, ResponseBuilder, ResponsesBuilder};
use womanslation_database::store::NotFoundKind;

use super::errors::INTERNAL_SERVER_ERROR_MESSAGE;


fn failure_envelope_response(description: &str, example_message: &str) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            mime::APPLICATION_JSON.as_ref(),
            ContentBuilder::new()
                .example(Some(json!({
                    "success": false,
                    "message": example_message,
                    "data": null
                })))
                .build(),
        )
        .build()
}

fn single_response(
    status_code: &str,
    response: Response,
) -> BTreeMap<String, RefOr<Response>> {
    ResponsesBuilder::new()
        .response(status_code, response)
        .build()
        .into()
}



/// `500 Internal Server Error`. The underlying error is logged, never sent.
pub struct InternalServerError;

impl utoipa::IntoResponses for InternalServerError {
    fn responses() -> BTreeMap<String, RefOr<Response>> {
        single_response(
            "500",
            failure_envelope_response(
                "Internal server error.",
                INTERNAL_SERVER_ERROR_MESSAGE,
            ),
        )
    }
}


/// `400 Bad Request` for malformed bodies, path parameters and query strings,
/// for values that fail validation and for duplicates of existing records.
pub struct InvalidRequest;

impl utoipa::IntoResponses for InvalidRequest {
    fn responses() -> BTreeMap<String, RefOr<Response>> {
        single_response(
            "400",
            failure_envelope_response(
                "The request is malformed, fails validation \
                or would duplicate an existing record.",
                "Phrase must be a string and at least 3 characters long",
            ),
        )
    }
}


macro_rules! not_found_response {
    ($struct_name:ident, $kind:expr, $description:literal) => {
        #[doc = concat!("`404 Not Found`: ", $description)]
        pub struct $struct_name;

        impl utoipa::IntoResponses for $struct_name {
            fn responses() -> BTreeMap<String, RefOr<Response>> {
                single_response(
                    "404",
                    failure_envelope_response($description, &$kind.to_string()),
                )
            }
        }
    };
}

not_found_response!(
    PhraseNotFound,
    NotFoundKind::Phrase,
    "The phrase does not exist."
);

not_found_response!(
    MeaningsNotFound,
    NotFoundKind::Meanings,
    "The phrase does not exist or has no meanings."
);

not_found_response!(
    MeaningNotFound,
    NotFoundKind::Meaning,
    "The phrase or its meaning does not exist."
);

not_found_response!(
    VoteNotFound,
    NotFoundKind::Vote,
    "The vote does not exist."
);
