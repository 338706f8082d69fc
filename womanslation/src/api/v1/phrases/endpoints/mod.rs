mod meaning;
mod phrase;
mod vote;

pub use meaning::*;
pub use phrase::*;
pub use vote::*;
