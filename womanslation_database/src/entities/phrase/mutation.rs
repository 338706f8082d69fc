use chrono::Utc;
use sqlx::PgConnection;
use womanslation_core::id::PhraseId;

use super::{InternalPhraseModel, PhraseModel};
use crate::{IntoExternalModel, QueryError, QueryResult};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewPhrase {
    pub text: String,
    pub suggested_response: Option<String>,
    pub tags: Vec<String>,
}


/// Every mutable field of a phrase; an update overwrites all of them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseValuesToUpdate {
    pub text: String,
    pub suggested_response: Option<String>,
    pub tags: Vec<String>,
}



pub struct PhraseMutation;

impl PhraseMutation {
    pub async fn create(
        database_connection: &mut PgConnection,
        phrase_to_create: NewPhrase,
    ) -> QueryResult<PhraseModel> {
        let new_phrase_id = PhraseId::generate();
        let new_phrase_create_date = Utc::now();

        let created_phrase = sqlx::query_as::<_, InternalPhraseModel>(
            "INSERT INTO womanslation.phrase \
                (id, text, suggested_response, tags, views, create_date) \
                VALUES ($1, $2, $3, $4, 0, $5) \
                RETURNING id, text, suggested_response, tags, views, create_date",
        )
        .bind(new_phrase_id.into_uuid())
        .bind(phrase_to_create.text)
        .bind(phrase_to_create.suggested_response)
        .bind(phrase_to_create.tags)
        .bind(new_phrase_create_date)
        .fetch_one(database_connection)
        .await?;

        Ok(created_phrase.into_external_model())
    }

    /// Returns `None` if the phrase does not exist.
    pub async fn update(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        values_to_update: PhraseValuesToUpdate,
    ) -> QueryResult<Option<PhraseModel>> {
        let updated_phrase = sqlx::query_as::<_, InternalPhraseModel>(
            "UPDATE womanslation.phrase \
                SET text = $1, suggested_response = $2, tags = $3 \
                WHERE id = $4 \
                RETURNING id, text, suggested_response, tags, views, create_date",
        )
        .bind(values_to_update.text)
        .bind(values_to_update.suggested_response)
        .bind(values_to_update.tags)
        .bind(phrase_id.into_uuid())
        .fetch_optional(database_connection)
        .await?;

        Ok(updated_phrase.map(IntoExternalModel::into_external_model))
    }

    /// Atomically increments the view counter. Returns `None` if the phrase does not exist.
    pub async fn increment_views(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<Option<PhraseModel>> {
        let viewed_phrase = sqlx::query_as::<_, InternalPhraseModel>(
            "UPDATE womanslation.phrase \
                SET views = views + 1 \
                WHERE id = $1 \
                RETURNING id, text, suggested_response, tags, views, create_date",
        )
        .bind(phrase_id.into_uuid())
        .fetch_optional(database_connection)
        .await?;

        Ok(viewed_phrase.map(IntoExternalModel::into_external_model))
    }

    /// Deletes the phrase along with its meanings (but not their votes).
    pub async fn delete(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query("DELETE FROM womanslation.phrase WHERE id = $1")
            .bind(phrase_id.into_uuid())
            .execute(database_connection)
            .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "more than one row was affected when deleting a phrase by ID",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }
}
