pub use std::net::Ipv4Addr;

pub use actix_http::{Method, StatusCode};
pub use womanslation_core::api_models::*;
pub use womanslation_core::tone::Tone;

pub use super::sample_phrases::*;
pub use super::server::{encode_path_segment, initialize_test_server, TestServer};
pub use super::TestResponse;
