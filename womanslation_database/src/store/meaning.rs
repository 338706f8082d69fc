use sqlx::{Connection, PgConnection};
use womanslation_core::{
    api_models::{MeaningCreationRequest, MeaningUpdateRequest},
    id::{MeaningId, PhraseId},
    voter::VoterIp,
};

use super::{DuplicateKind, NotFoundKind, StoreError, StoreResult};
use crate::entities::{
    NewPhraseMeaning,
    PhraseMeaningMutation,
    PhraseMeaningQuery,
    PhraseMeaningValuesToUpdate,
    PhraseMeaningWithVotesModel,
    PhraseQuery,
};


pub struct MeaningStore;

impl MeaningStore {
    /// Adds a meaning to the phrase.
    ///
    /// The phrase row stays locked between the duplicate check and the insert,
    /// so two identical meanings can not slip in concurrently.
    pub async fn create(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        creation_request: MeaningCreationRequest,
    ) -> StoreResult<PhraseMeaningWithVotesModel> {
        creation_request.validate()?;


        let mut transaction = database_connection.begin().await?;

        if !PhraseQuery::lock_by_id(&mut transaction, phrase_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Phrase));
        }

        let duplicate_exists = PhraseMeaningQuery::exists_by_meaning_and_tone(
            &mut transaction,
            phrase_id,
            &creation_request.meaning,
            creation_request.tone,
            None,
        )
        .await?;

        if duplicate_exists {
            return Err(StoreError::duplicate(DuplicateKind::MeaningAndTone));
        }

        let created_meaning = PhraseMeaningMutation::create(
            &mut transaction,
            phrase_id,
            NewPhraseMeaning {
                meaning: creation_request.meaning,
                tone: creation_request.tone,
                confidence: creation_request.confidence,
                warning_level: creation_request.warning_level,
            },
        )
        .await?;

        transaction.commit().await?;


        // Nobody can have voted on a meaning that did not exist a moment ago.
        Ok(PhraseMeaningWithVotesModel {
            meaning: created_meaning,
            like_count: 0,
            is_liked_by_voter: false,
        })
    }

    /// All meanings of the phrase in creation order, with vote aggregates for `voter_ip`.
    ///
    /// A phrase without meanings is reported as [`NotFoundKind::Meanings`].
    pub async fn get_by_phrase_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        voter_ip: &VoterIp,
    ) -> StoreResult<Vec<PhraseMeaningWithVotesModel>> {
        if !PhraseQuery::exists_by_id(database_connection, phrase_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Phrase));
        }

        let meanings =
            PhraseMeaningQuery::get_all_by_phrase_id_with_votes(database_connection, phrase_id, voter_ip)
                .await?;

        if meanings.is_empty() {
            return Err(StoreError::not_found(NotFoundKind::Meanings));
        }

        Ok(meanings)
    }

    /// Replaces the meaning's fields in place; its ID and creation date are kept.
    pub async fn update(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
        update_request: MeaningUpdateRequest,
        voter_ip: &VoterIp,
    ) -> StoreResult<PhraseMeaningWithVotesModel> {
        update_request.validate()?;


        let mut transaction = database_connection.begin().await?;

        if !PhraseQuery::lock_by_id(&mut transaction, phrase_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Phrase));
        }

        if !PhraseMeaningQuery::exists(&mut transaction, phrase_id, meaning_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Meaning));
        }

        let duplicate_exists = PhraseMeaningQuery::exists_by_meaning_and_tone(
            &mut transaction,
            phrase_id,
            &update_request.meaning,
            update_request.tone,
            Some(meaning_id),
        )
        .await?;

        if duplicate_exists {
            return Err(StoreError::duplicate(DuplicateKind::MeaningAndTone));
        }

        PhraseMeaningMutation::update(
            &mut transaction,
            phrase_id,
            meaning_id,
            PhraseMeaningValuesToUpdate {
                meaning: update_request.meaning,
                tone: update_request.tone,
                confidence: update_request.confidence,
                warning_level: update_request.warning_level,
            },
        )
        .await?
        .ok_or(StoreError::not_found(NotFoundKind::Meaning))?;

        transaction.commit().await?;


        PhraseMeaningQuery::get_with_votes(database_connection, phrase_id, meaning_id, voter_ip)
            .await?
            .ok_or(StoreError::not_found(NotFoundKind::Meaning))
    }

    /// Removes one meaning. Its votes are left alone;
    /// see [`VoteStore::delete_by_meaning_id`](super::VoteStore::delete_by_meaning_id).
    pub async fn delete(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        meaning_id: MeaningId,
    ) -> StoreResult<()> {
        let deleted = PhraseMeaningMutation::delete(database_connection, phrase_id, meaning_id).await?;

        if !deleted {
            return Err(StoreError::not_found(NotFoundKind::Meaning));
        }

        Ok(())
    }

    /// Removes every meaning of the phrase and returns how many there were.
    pub async fn delete_all_for_phrase(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> StoreResult<u64> {
        if !PhraseQuery::exists_by_id(database_connection, phrase_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Phrase));
        }

        Ok(PhraseMeaningMutation::delete_all_by_phrase_id(database_connection, phrase_id).await?)
    }
}
