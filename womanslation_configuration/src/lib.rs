//! All configuration-relevant code: the full configuration structure
//! as well as the methods needed to load and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The configuration file is first deserialized into unvalidated ("unresolved")
//! structures, which are then turned into their validated ("resolved") versions
//! through the traits in the `traits` module. Any validation that `serde`
//! can't express (e.g. that a tracing filter actually parses) happens
//! during resolution.

#![allow(rustdoc::private_intra_doc_links)]

mod error;
mod structure;
mod traits;
mod utilities;

pub use error::*;
pub use structure::*;
