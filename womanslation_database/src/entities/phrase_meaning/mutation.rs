use chrono::Utc;
use sqlx::PgConnection;
use womanslation_core::{
    id::{MeaningId, PhraseId},
    tone::Tone,
};

use super::{InternalPhraseMeaningModel, PhraseMeaningModel};
use crate::{QueryError, QueryResult, TryIntoExternalModel};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewPhraseMeaning {
    pub meaning: String,
    pub tone: Tone,
    pub confidence: i32,
    pub warning_level: i32,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseMeaningValuesToUpdate {
    pub meaning: String,
    pub tone: Tone,
    pub confidence: i32,
    pub warning_level: i32,
}



pub struct PhraseMeaningMutation;

impl PhraseMeaningMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_to_create: NewPhraseMeaning,
    ) -> QueryResult<PhraseMeaningModel> {
        let new_meaning_id = MeaningId::generate();
        let new_meaning_create_date = Utc::now();

        let created_meaning = sqlx::query_as::<_, InternalPhraseMeaningModel>(
            "INSERT INTO womanslation.phrase_meaning \
                (id, phrase_id, meaning, tone, confidence, warning_level, create_date) \
                VALUES ($1, $2, $3, $4, $5, $6, $7) \
                RETURNING \
                    id, phrase_id, meaning, tone, \
                    confidence, warning_level, create_date",
        )
        .bind(new_meaning_id.into_uuid())
        .bind(phrase_id.into_uuid())
        .bind(meaning_to_create.meaning)
        .bind(meaning_to_create.tone.label())
        .bind(meaning_to_create.confidence)
        .bind(meaning_to_create.warning_level)
        .bind(new_meaning_create_date)
        .fetch_one(database_connection)
        .await?;

        created_meaning
            .try_into_external_model()
            .map_err(|reason| QueryError::ModelError { reason })
    }

    /// Returns `None` if the phrase has no meaning with the given ID.
    pub async fn update(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
        values_to_update: PhraseMeaningValuesToUpdate,
    ) -> QueryResult<Option<PhraseMeaningModel>> {
        let updated_meaning = sqlx::query_as::<_, InternalPhraseMeaningModel>(
            "UPDATE womanslation.phrase_meaning \
                SET meaning = $1, tone = $2, confidence = $3, warning_level = $4 \
                WHERE phrase_id = $5 AND id = $6 \
                RETURNING \
                    id, phrase_id, meaning, tone, \
                    confidence, warning_level, create_date",
        )
        .bind(values_to_update.meaning)
        .bind(values_to_update.tone.label())
        .bind(values_to_update.confidence)
        .bind(values_to_update.warning_level)
        .bind(phrase_id.into_uuid())
        .bind(meaning_id.into_uuid())
        .fetch_optional(database_connection)
        .await?;

        let Some(updated_meaning) = updated_meaning else {
            return Ok(None);
        };

        Ok(Some(
            updated_meaning
                .try_into_external_model()
                .map_err(|reason| QueryError::ModelError { reason })?,
        ))
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query(
            "DELETE FROM womanslation.phrase_meaning \
                WHERE phrase_id = $1 AND id = $2",
        )
        .bind(phrase_id.into_uuid())
        .bind(meaning_id.into_uuid())
        .execute(database_connection)
        .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "more than one row was affected when deleting a phrase meaning by ID",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }

    /// Returns the number of deleted meanings.
    pub async fn delete_all_by_phrase_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<u64> {
        let query_result =
            sqlx::query("DELETE FROM womanslation.phrase_meaning WHERE phrase_id = $1")
                .bind(phrase_id.into_uuid())
                .execute(database_connection)
                .await?;

        Ok(query_result.rows_affected())
    }
}
