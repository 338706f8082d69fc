use chrono::Utc;
use sqlx::PgConnection;
use womanslation_core::id::{MeaningId, PhraseId, VoteId};

use super::{InternalUpsertedMeaningVoteModel, UpsertedMeaningVoteModel};
use crate::{IntoExternalModel, QueryError, QueryResult};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewMeaningVote {
    pub phrase_id: PhraseId,
    pub meaning_id: MeaningId,
    pub ip: String,
    pub like: bool,
}



pub struct MeaningVoteMutation;

impl MeaningVoteMutation {
    /// Inserts the vote, or overwrites `liked` and `create_date` of the vote
    /// this IP already has on the meaning. Runs as a single statement.
    pub async fn upsert(
        database_connection: &mut PgConnection,
        vote: NewMeaningVote,
    ) -> QueryResult<UpsertedMeaningVoteModel> {
        let new_vote_id = VoteId::generate();
        let new_vote_create_date = Utc::now();

        // `xmax` is only zero on a row version that was freshly inserted.
        let upserted_vote = sqlx::query_as::<_, InternalUpsertedMeaningVoteModel>(
            "INSERT INTO womanslation.meaning_vote \
                (id, phrase_id, meaning_id, ip, liked, create_date) \
                VALUES ($1, $2, $3, $4, $5, $6) \
                ON CONFLICT (meaning_id, ip) DO UPDATE \
                    SET liked = EXCLUDED.liked, create_date = EXCLUDED.create_date \
                RETURNING \
                    id, phrase_id, meaning_id, ip, liked, create_date, \
                    (xmax = 0) AS newly_created",
        )
        .bind(new_vote_id.into_uuid())
        .bind(vote.phrase_id.into_uuid())
        .bind(vote.meaning_id.into_uuid())
        .bind(vote.ip)
        .bind(vote.like)
        .bind(new_vote_create_date)
        .fetch_one(database_connection)
        .await?;

        Ok(upserted_vote.into_external_model())
    }

    pub async fn delete(
        database_connection: &mut PgConnection,
        vote_id: VoteId,
    ) -> QueryResult<bool> {
        let query_result = sqlx::query("DELETE FROM womanslation.meaning_vote WHERE id = $1")
            .bind(vote_id.into_uuid())
            .execute(database_connection)
            .await?;

        if query_result.rows_affected() > 1 {
            return Err(QueryError::database_inconsistency(
                "more than one row was affected when deleting a vote by ID",
            ));
        }

        Ok(query_result.rows_affected() == 1)
    }

    /// Returns the number of deleted votes.
    pub async fn delete_all_by_meaning_id(
        database_connection: &mut PgConnection,
        meaning_id: MeaningId,
    ) -> QueryResult<u64> {
        let query_result =
            sqlx::query("DELETE FROM womanslation.meaning_vote WHERE meaning_id = $1")
                .bind(meaning_id.into_uuid())
                .execute(database_connection)
                .await?;

        Ok(query_result.rows_affected())
    }

    /// Returns the number of deleted votes.
    pub async fn delete_all_by_phrase_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> QueryResult<u64> {
        let query_result =
            sqlx::query("DELETE FROM womanslation.meaning_vote WHERE phrase_id = $1")
                .bind(phrase_id.into_uuid())
                .execute(database_connection)
                .await?;

        Ok(query_result.rows_affected())
    }
}
