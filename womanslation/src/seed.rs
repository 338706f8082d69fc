//! Loads the example phrases into an empty database.

use sqlx::PgConnection;
use thiserror::Error;
use tracing::{info, warn};
use womanslation_core::{api_models::PhraseCreationRequest, voter::VoterIp};
use womanslation_database::store::{PhraseStore, StoreError};


const EXAMPLE_PHRASES_JSON: &str = include_str!("../seed/example_phrases.json");


#[derive(Debug, Error)]
pub enum SeedingError {
    #[error("the bundled example phrases are not valid")]
    InvalidExamplePhrases {
        #[from]
        #[source]
        error: serde_json::Error,
    },

    #[error("unable to check whether the database is empty")]
    UnableToInspectDatabase {
        #[source]
        error: StoreError,
    },
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedingReport {
    pub inserted_phrases: usize,
    pub skipped_phrases: usize,
}


pub fn example_phrases() -> Result<Vec<PhraseCreationRequest>, serde_json::Error> {
    serde_json::from_str(EXAMPLE_PHRASES_JSON)
}


/// Inserts the example phrases through [`PhraseStore::create`], but only if
/// there are no phrases yet. Returns `None` if the database was not empty.
///
/// A phrase that can not be inserted is logged and skipped.
pub async fn seed_example_phrases_if_empty(
    database_connection: &mut PgConnection,
) -> Result<Option<SeedingReport>, SeedingError> {
    let is_empty = PhraseStore::is_empty(database_connection)
        .await
        .map_err(|error| SeedingError::UnableToInspectDatabase { error })?;

    if !is_empty {
        info!("Database already contains phrases, not seeding.");
        return Ok(None);
    }


    let example_phrases = example_phrases()?;

    // Meanings are returned with vote aggregates; nobody has voted yet.
    let seeding_voter = VoterIp::new(String::new());
    let mut report = SeedingReport::default();

    for example_phrase in example_phrases {
        let phrase_text = example_phrase.text.clone();

        match PhraseStore::create(database_connection, example_phrase, &seeding_voter).await {
            Ok(_) => {
                report.inserted_phrases += 1;
            }
            Err(error) => {
                warn!(
                    phrase = phrase_text.as_str(),
                    error = %error,
                    "Skipping example phrase that could not be inserted."
                );

                report.skipped_phrases += 1;
            }
        }
    }


    info!(
        inserted = report.inserted_phrases,
        skipped = report.skipped_phrases,
        "Seeded database with example phrases."
    );

    Ok(Some(report))
}
