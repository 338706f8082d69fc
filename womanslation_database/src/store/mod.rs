//! Store operations that enforce the consistency and deduplication rules
//! on top of the plain entity queries and mutations.
//!
//! Every store function takes a database connection and, where reads are
//! enriched with vote aggregates, the [`VoterIp`](womanslation_core::voter::VoterIp)
//! of the caller.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use womanslation_core::validation::ValidationError;

use crate::QueryError;

mod meaning;
mod phrase;
mod vote;

pub use meaning::*;
pub use phrase::*;
pub use vote::*;



#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    /// Another phrase already has this exact text.
    PhraseText,

    /// The phrase already has a meaning with this exact text and tone.
    MeaningAndTone,
}

impl Display for DuplicateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhraseText => f.write_str("Phrase already exists in the database"),
            Self::MeaningAndTone => f.write_str("Meaning already exists in the database"),
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Phrase,

    /// The phrase exists, but has no meanings.
    Meanings,

    Meaning,

    Vote,
}

impl Display for NotFoundKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Phrase => f.write_str("Phrase not found!"),
            Self::Meanings => f.write_str("Meanings not found!"),
            Self::Meaning => f.write_str("Meaning not found!"),
            Self::Vote => f.write_str("Vote not found!"),
        }
    }
}



#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Duplicate(DuplicateKind),

    #[error("{0}")]
    NotFound(NotFoundKind),

    #[error("persistence error")]
    Persistence(#[from] QueryError),
}

impl StoreError {
    #[inline]
    pub const fn duplicate(kind: DuplicateKind) -> Self {
        Self::Duplicate(kind)
    }

    #[inline]
    pub const fn not_found(kind: NotFoundKind) -> Self {
        Self::NotFound(kind)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Persistence(QueryError::from(error))
    }
}


pub type StoreResult<T> = Result<T, StoreError>;



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            StoreError::duplicate(DuplicateKind::PhraseText).to_string(),
            "Phrase already exists in the database"
        );
        assert_eq!(
            StoreError::not_found(NotFoundKind::Meanings).to_string(),
            "Meanings not found!"
        );
        assert_eq!(
            StoreError::from(ValidationError::VoterIpTooShort).to_string(),
            "IP must be a string and at least 7 characters long"
        );
    }

    #[test]
    fn persistence_errors_do_not_leak_details() {
        let error = StoreError::from(QueryError::database_inconsistency("two phrases with one id"));

        assert_eq!(error.to_string(), "persistence error");
    }
}
