use sqlx::PgConnection;
use womanslation_core::{
    id::{MeaningId, PhraseId, VoteId},
    validation::validate_voter_ip,
    voter::VoterIp,
};

use super::{NotFoundKind, StoreError, StoreResult};
use crate::entities::{
    MeaningVoteModel,
    MeaningVoteMutation,
    MeaningVoteQuery,
    NewMeaningVote,
    PhraseMeaningQuery,
    UpsertedMeaningVoteModel,
};


pub struct VoteStore;

impl VoteStore {
    /// Casts or changes `voter_ip`'s vote on the meaning.
    ///
    /// There is at most one vote per meaning and voter: voting again
    /// overwrites the previous vote instead of adding another one.
    pub async fn create_or_update(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
        voter_ip: &VoterIp,
        like: bool,
    ) -> StoreResult<UpsertedMeaningVoteModel> {
        validate_voter_ip(voter_ip.as_str())?;

        if !PhraseMeaningQuery::exists(database_connection, phrase_id, meaning_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Meaning));
        }

        Ok(MeaningVoteMutation::upsert(
            database_connection,
            NewMeaningVote {
                phrase_id,
                meaning_id,
                ip: voter_ip.as_str().to_string(),
                like,
            },
        )
        .await?)
    }

    /// All likes cast from `voter_ip`.
    pub async fn get_by_ip(
        database_connection: &mut PgConnection,
        voter_ip: &VoterIp,
    ) -> StoreResult<Vec<MeaningVoteModel>> {
        Ok(MeaningVoteQuery::get_all_likes_by_ip(database_connection, voter_ip).await?)
    }

    pub async fn count_likes(
        database_connection: &mut PgConnection,
        meaning_id: MeaningId,
    ) -> StoreResult<i64> {
        Ok(MeaningVoteQuery::count_likes(database_connection, meaning_id).await?)
    }

    pub async fn delete(database_connection: &mut PgConnection, vote_id: VoteId) -> StoreResult<()> {
        let deleted = MeaningVoteMutation::delete(database_connection, vote_id).await?;

        if !deleted {
            return Err(StoreError::not_found(NotFoundKind::Vote));
        }

        Ok(())
    }

    /// Returns the number of deleted votes.
    pub async fn delete_by_meaning_id(
        database_connection: &mut PgConnection,
        meaning_id: MeaningId,
    ) -> StoreResult<u64> {
        Ok(MeaningVoteMutation::delete_all_by_meaning_id(database_connection, meaning_id).await?)
    }

    /// Returns the number of deleted votes.
    pub async fn delete_by_phrase_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> StoreResult<u64> {
        Ok(MeaningVoteMutation::delete_all_by_phrase_id(database_connection, phrase_id).await?)
    }
}
