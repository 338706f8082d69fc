use itertools::Itertools;
use sqlx::{Connection, PgConnection};
use tracing::debug;
use womanslation_core::{
    api_models::{PhraseCreationRequest, PhraseUpdateRequest, PhrasesListRequest},
    id::PhraseId,
    validation::normalize_tag,
    voter::VoterIp,
};

use super::{DuplicateKind, MeaningStore, NotFoundKind, StoreError, StoreResult};
use crate::{
    entities::{
        NewPhrase,
        PhraseListOptions,
        PhraseMeaningQuery,
        PhraseMeaningWithVotesModel,
        PhraseModel,
        PhraseMutation,
        PhraseQuery,
        PhraseValuesToUpdate,
    },
    QueryError,
    QueryResult,
};


/// A phrase with its meanings (in creation order) attached.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseWithMeaningsModel {
    pub phrase: PhraseModel,
    pub meanings: Vec<PhraseMeaningWithVotesModel>,
}


/// Loads the meanings of all `phrases` with a single query and attaches them.
async fn attach_meanings(
    database_connection: &mut PgConnection,
    phrases: Vec<PhraseModel>,
    voter_ip: &VoterIp,
) -> QueryResult<Vec<PhraseWithMeaningsModel>> {
    let phrase_ids = phrases.iter().map(|phrase| phrase.id).collect_vec();

    let mut meanings_by_phrase_id = PhraseMeaningQuery::get_all_by_phrase_ids_with_votes(
        database_connection,
        &phrase_ids,
        voter_ip,
    )
    .await?
    .into_iter()
    .into_group_map_by(|meaning| meaning.meaning.phrase_id);

    Ok(phrases
        .into_iter()
        .map(|phrase| {
            let meanings = meanings_by_phrase_id
                .remove(&phrase.id)
                .unwrap_or_default();

            PhraseWithMeaningsModel { phrase, meanings }
        })
        .collect())
}

async fn attach_meanings_to_one(
    database_connection: &mut PgConnection,
    phrase: PhraseModel,
    voter_ip: &VoterIp,
) -> QueryResult<PhraseWithMeaningsModel> {
    let meanings =
        PhraseMeaningQuery::get_all_by_phrase_id_with_votes(database_connection, phrase.id, voter_ip)
            .await?;

    Ok(PhraseWithMeaningsModel { phrase, meanings })
}

/// Maps a unique constraint violation on the phrase text onto a duplicate error,
/// which can only happen if two identical phrases are written concurrently.
fn duplicate_text_on_unique_violation(error: QueryError) -> StoreError {
    if error.is_unique_violation() {
        debug!("Concurrent phrase insert lost the race on the unique text constraint.");
        StoreError::duplicate(DuplicateKind::PhraseText)
    } else {
        StoreError::from(error)
    }
}



pub struct PhraseStore;

impl PhraseStore {
    /// Creates the phrase and all of its meanings in one transaction
    /// and returns the phrase as stored.
    pub async fn create(
        database_connection: &mut PgConnection,
        creation_request: PhraseCreationRequest,
        voter_ip: &VoterIp,
    ) -> StoreResult<PhraseWithMeaningsModel> {
        creation_request.validate()?;

        let normalized_tags = creation_request.normalized_tags();
        let PhraseCreationRequest {
            text,
            suggested_response,
            meanings,
            ..
        } = creation_request;


        let mut transaction = database_connection.begin().await?;

        if PhraseQuery::exists_by_text(&mut transaction, &text, None).await? {
            return Err(StoreError::duplicate(DuplicateKind::PhraseText));
        }

        let created_phrase = PhraseMutation::create(
            &mut transaction,
            NewPhrase {
                text,
                suggested_response,
                tags: normalized_tags,
            },
        )
        .await
        .map_err(duplicate_text_on_unique_violation)?;

        for meaning_request in meanings {
            MeaningStore::create(&mut transaction, created_phrase.id, meaning_request).await?;
        }

        transaction.commit().await?;


        Self::get_by_id(database_connection, created_phrase.id, voter_ip).await
    }

    pub async fn get_by_id(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        voter_ip: &VoterIp,
    ) -> StoreResult<PhraseWithMeaningsModel> {
        let phrase = PhraseQuery::get_by_id(database_connection, phrase_id)
            .await?
            .ok_or(StoreError::not_found(NotFoundKind::Phrase))?;

        Ok(attach_meanings_to_one(database_connection, phrase, voter_ip).await?)
    }

    pub async fn get_by_text(
        database_connection: &mut PgConnection,
        phrase_text: &str,
        voter_ip: &VoterIp,
    ) -> StoreResult<PhraseWithMeaningsModel> {
        let phrase = PhraseQuery::get_by_text(database_connection, phrase_text)
            .await?
            .ok_or(StoreError::not_found(NotFoundKind::Phrase))?;

        Ok(attach_meanings_to_one(database_connection, phrase, voter_ip).await?)
    }

    /// Overwrites text, suggested response and tags.
    /// Views, meanings and the creation date are left untouched.
    pub async fn update(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        update_request: PhraseUpdateRequest,
        voter_ip: &VoterIp,
    ) -> StoreResult<PhraseWithMeaningsModel> {
        update_request.validate()?;

        let normalized_tags = update_request.normalized_tags();
        let PhraseUpdateRequest {
            text,
            suggested_response,
            ..
        } = update_request;


        if !PhraseQuery::exists_by_id(database_connection, phrase_id).await? {
            return Err(StoreError::not_found(NotFoundKind::Phrase));
        }

        if PhraseQuery::exists_by_text(database_connection, &text, Some(phrase_id)).await? {
            return Err(StoreError::duplicate(DuplicateKind::PhraseText));
        }

        let updated_phrase = PhraseMutation::update(
            database_connection,
            phrase_id,
            PhraseValuesToUpdate {
                text,
                suggested_response,
                tags: normalized_tags,
            },
        )
        .await
        .map_err(duplicate_text_on_unique_violation)?
        .ok_or(StoreError::not_found(NotFoundKind::Phrase))?;

        Ok(attach_meanings_to_one(database_connection, updated_phrase, voter_ip).await?)
    }

    /// Atomically increments the view counter and returns the updated phrase.
    pub async fn view(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
        voter_ip: &VoterIp,
    ) -> StoreResult<PhraseWithMeaningsModel> {
        let viewed_phrase = PhraseMutation::increment_views(database_connection, phrase_id)
            .await?
            .ok_or(StoreError::not_found(NotFoundKind::Phrase))?;

        Ok(attach_meanings_to_one(database_connection, viewed_phrase, voter_ip).await?)
    }

    /// Deletes the phrase and its meanings. Votes are left alone;
    /// see [`VoteStore::delete_by_phrase_id`](super::VoteStore::delete_by_phrase_id).
    pub async fn delete(
        database_connection: &mut PgConnection,
        phrase_id: PhraseId,
    ) -> StoreResult<()> {
        let deleted = PhraseMutation::delete(database_connection, phrase_id).await?;

        if !deleted {
            return Err(StoreError::not_found(NotFoundKind::Phrase));
        }

        Ok(())
    }

    /// Returns one page of phrases. An empty page is not an error.
    pub async fn list(
        database_connection: &mut PgConnection,
        list_request: &PhrasesListRequest,
        voter_ip: &VoterIp,
    ) -> StoreResult<Vec<PhraseWithMeaningsModel>> {
        let phrases = PhraseQuery::list(
            database_connection,
            PhraseListOptions {
                page_index: list_request.page_number,
                page_size: list_request.effective_page_size(),
                sort_order: list_request.page_order,
                search_text: list_request.effective_search_text().map(str::to_string),
                tags: list_request.tag_filter(),
            },
        )
        .await?;

        Ok(attach_meanings(database_connection, phrases, voter_ip).await?)
    }

    pub async fn search_by_text(
        database_connection: &mut PgConnection,
        search_text: &str,
        voter_ip: &VoterIp,
    ) -> StoreResult<Vec<PhraseWithMeaningsModel>> {
        let phrases = PhraseQuery::search_by_text(database_connection, search_text).await?;

        Ok(attach_meanings(database_connection, phrases, voter_ip).await?)
    }

    /// Exact tag match, after the tag is normalized the same way stored tags are.
    pub async fn search_by_tag(
        database_connection: &mut PgConnection,
        tag: &str,
        voter_ip: &VoterIp,
    ) -> StoreResult<Vec<PhraseWithMeaningsModel>> {
        let phrases = PhraseQuery::search_by_tag(database_connection, &normalize_tag(tag)).await?;

        Ok(attach_meanings(database_connection, phrases, voter_ip).await?)
    }

    pub async fn is_empty(database_connection: &mut PgConnection) -> StoreResult<bool> {
        Ok(!PhraseQuery::exists_any(database_connection).await?)
    }
}
