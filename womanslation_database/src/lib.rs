use std::borrow::Cow;

use sqlx::migrate::Migrator;
use thiserror::Error;

pub mod entities;
pub mod store;


/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("model error: {}", .reason)]
    ModelError { reason: Cow<'static, str> },

    #[error("database inconsistency: {}", .problem)]
    DatabaseInconsistencyError { problem: Cow<'static, str> },
}

impl QueryError {
    pub fn database_inconsistency<R>(problem: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::DatabaseInconsistencyError {
            problem: problem.into(),
        }
    }

    /// Whether this error was caused by a unique constraint rejecting a row.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::SqlxError { error } => error
                .as_database_error()
                .is_some_and(|database_error| database_error.is_unique_violation()),
            _ => false,
        }
    }
}


pub type QueryResult<R, E = QueryError> = Result<R, E>;



pub trait IntoExternalModel {
    type ExternalModel;

    fn into_external_model(self) -> Self::ExternalModel;
}

pub trait TryIntoExternalModel {
    type ExternalModel;
    type Error;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error>;
}
