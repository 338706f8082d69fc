use sqlx::PgConnection;
use womanslation_core::{id::MeaningId, voter::VoterIp};

use super::{InternalMeaningVoteModel, MeaningVoteModel};
use crate::{IntoExternalModel, QueryResult};


pub struct MeaningVoteQuery;

impl MeaningVoteQuery {
    /// All likes (`liked = true`) cast from `voter_ip`, oldest first.
    pub async fn get_all_likes_by_ip(
        database_connection: &mut PgConnection,
        voter_ip: &VoterIp,
    ) -> QueryResult<Vec<MeaningVoteModel>> {
        let internal_votes = sqlx::query_as::<_, InternalMeaningVoteModel>(
            "SELECT id, phrase_id, meaning_id, ip, liked, create_date \
                FROM womanslation.meaning_vote \
                WHERE ip = $1 AND liked = TRUE \
                ORDER BY create_date ASC, id ASC",
        )
        .bind(voter_ip.as_str())
        .fetch_all(database_connection)
        .await?;

        Ok(internal_votes
            .into_iter()
            .map(IntoExternalModel::into_external_model)
            .collect())
    }

    pub async fn count_likes(
        database_connection: &mut PgConnection,
        meaning_id: MeaningId,
    ) -> QueryResult<i64> {
        let like_count = sqlx::query_scalar::<_, i64>(
            "SELECT count(*) FROM womanslation.meaning_vote \
                WHERE meaning_id = $1 AND liked = TRUE",
        )
        .bind(meaning_id.into_uuid())
        .fetch_one(database_connection)
        .await?;

        Ok(like_count)
    }
}
