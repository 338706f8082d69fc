//! Harness for end-to-end tests that run the real API against a PostgreSQL database.

pub mod prelude;
mod response;
pub mod sample_phrases;
mod server;
pub use response::*;
pub use server::*;
