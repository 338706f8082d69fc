mod envelope;
mod health;
mod meanings;
mod phrases;
mod votes;

pub use envelope::*;
pub use health::*;
pub use meanings::*;
pub use phrases::*;
pub use votes::*;
