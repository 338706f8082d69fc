mod model;
mod mutation;
mod query;

pub use model::*;
pub use mutation::*;
pub use query::*;
