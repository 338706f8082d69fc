//! API definitions and annotations for Womanslation.

use actix_web::{web, HttpRequest, Scope};

use self::errors::EndpointError;
use self::v1::v1_api_router;

pub mod errors;
pub mod openapi;
pub mod traits;
pub mod v1;
pub mod voter;



/// Extractor configuration that turns malformed JSON bodies, path parameters
/// and query strings into enveloped `400 Bad Request` responses.
pub fn json_extractor_configuration() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _: &HttpRequest| {
        EndpointError::from(error).into()
    })
}

pub fn path_extractor_configuration() -> web::PathConfig {
    web::PathConfig::default().error_handler(|error, _: &HttpRequest| {
        EndpointError::from(error).into()
    })
}

pub fn query_extractor_configuration() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|error, _: &HttpRequest| {
        EndpointError::from(error).into()
    })
}



/// Router for the entire public API.
///
/// Lives under the `/api` path and is made up of `/v1` and its sub-routes.
#[rustfmt::skip]
pub fn api_router() -> Scope {
    web::scope("/api")
        .service(v1_api_router())
}
