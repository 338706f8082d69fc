pub mod api;
pub mod cli;
pub mod connect;
pub mod logging;
pub mod seed;
pub mod state;

pub use connect::*;
