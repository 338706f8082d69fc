use sqlx::PgConnection;
use womanslation_core::{
    id::{MeaningId, PhraseId},
    tone::Tone,
    voter::VoterIp,
};

use super::{InternalPhraseMeaningWithVotesModel, PhraseMeaningWithVotesModel};
use crate::{QueryError, QueryResult, TryIntoExternalModel};


fn convert_meanings_with_votes(
    internal_meanings: Vec<InternalPhraseMeaningWithVotesModel>,
) -> QueryResult<Vec<PhraseMeaningWithVotesModel>> {
    let mut external_meanings = Vec::with_capacity(internal_meanings.len());

    for internal_meaning in internal_meanings {
        let external_meaning = internal_meaning
            .try_into_external_model()
            .map_err(|reason| QueryError::ModelError { reason })?;

        external_meanings.push(external_meaning);
    }

    Ok(external_meanings)
}



pub struct PhraseMeaningQuery;

impl PhraseMeaningQuery {
    /// All meanings of the given phrases in creation order,
    /// with vote aggregates for `voter_ip`.
    pub async fn get_all_by_phrase_ids_with_votes(
        database_connection: &mut PgConnection,
        phrase_ids: &[PhraseId],
        voter_ip: &VoterIp,
    ) -> QueryResult<Vec<PhraseMeaningWithVotesModel>> {
        if phrase_ids.is_empty() {
            return Ok(Vec::new());
        }

        let phrase_uuids = phrase_ids
            .iter()
            .map(|phrase_id| phrase_id.into_uuid())
            .collect::<Vec<_>>();

        let internal_meanings = sqlx::query_as::<_, InternalPhraseMeaningWithVotesModel>(
            "SELECT \
                    pm.id, pm.phrase_id, pm.meaning, pm.tone, \
                    pm.confidence, pm.warning_level, pm.create_date, \
                    count(mv.id) FILTER (WHERE mv.liked) AS like_count, \
                    coalesce(bool_or(mv.liked AND mv.ip = $2), FALSE) AS is_liked_by_voter \
                FROM womanslation.phrase_meaning AS pm \
                LEFT JOIN womanslation.meaning_vote AS mv \
                    ON mv.meaning_id = pm.id \
                WHERE pm.phrase_id = ANY($1) \
                GROUP BY pm.id \
                ORDER BY pm.create_date ASC, pm.id ASC",
        )
        .bind(phrase_uuids)
        .bind(voter_ip.as_str())
        .fetch_all(database_connection)
        .await?;

        convert_meanings_with_votes(internal_meanings)
    }

    pub async fn get_all_by_phrase_id_with_votes(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        voter_ip: &VoterIp,
    ) -> QueryResult<Vec<PhraseMeaningWithVotesModel>> {
        Self::get_all_by_phrase_ids_with_votes(database_connection, &[phrase_id], voter_ip).await
    }

    pub async fn get_with_votes(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
        voter_ip: &VoterIp,
    ) -> QueryResult<Option<PhraseMeaningWithVotesModel>> {
        let internal_meaning = sqlx::query_as::<_, InternalPhraseMeaningWithVotesModel>(
            "SELECT \
                    pm.id, pm.phrase_id, pm.meaning, pm.tone, \
                    pm.confidence, pm.warning_level, pm.create_date, \
                    count(mv.id) FILTER (WHERE mv.liked) AS like_count, \
                    coalesce(bool_or(mv.liked AND mv.ip = $3), FALSE) AS is_liked_by_voter \
                FROM womanslation.phrase_meaning AS pm \
                LEFT JOIN womanslation.meaning_vote AS mv \
                    ON mv.meaning_id = pm.id \
                WHERE pm.phrase_id = $1 AND pm.id = $2 \
                GROUP BY pm.id",
        )
        .bind(phrase_id.into_uuid())
        .bind(meaning_id.into_uuid())
        .bind(voter_ip.as_str())
        .fetch_optional(database_connection)
        .await?;

        let Some(internal_meaning) = internal_meaning else {
            return Ok(None);
        };

        Ok(Some(
            internal_meaning
                .try_into_external_model()
                .map_err(|reason| QueryError::ModelError { reason })?,
        ))
    }

    pub async fn exists(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM womanslation.phrase_meaning \
                    WHERE phrase_id = $1 AND id = $2 \
            )",
        )
        .bind(phrase_id.into_uuid())
        .bind(meaning_id.into_uuid())
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }

    /// Checks whether the phrase already has a meaning with this exact
    /// text and tone, ignoring `excluded_meaning_id` if given.
    pub async fn exists_by_meaning_and_tone(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning: &str,
        tone: Tone,
        excluded_meaning_id: Option<MeaningId>,
    ) -> QueryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM womanslation.phrase_meaning \
                    WHERE phrase_id = $1 \
                        AND meaning = $2 \
                        AND tone = $3 \
                        AND ($4::uuid IS NULL OR id <> $4) \
            )",
        )
        .bind(phrase_id.into_uuid())
        .bind(meaning)
        .bind(tone.label())
        .bind(excluded_meaning_id.map(MeaningId::into_uuid))
        .fetch_one(database_connection)
        .await?;

        Ok(exists)
    }
}
