mod meaning_vote;
mod phrase;
mod phrase_meaning;

pub use meaning_vote::*;
pub use phrase::*;
pub use phrase_meaning::*;
