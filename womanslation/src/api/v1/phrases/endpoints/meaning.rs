use actix_web::{delete, get, post, put, web};
use sqlx::Connection;
use tracing::info;
use womanslation_core::{
    api_models::{
        MeaningCreationRequest,
        MeaningDeletionResponse,
        MeaningUpdateRequest,
        MeaningWithVotes,
        MeaningsDeletionResponse,
        ResponseEnvelope,
    },
    id::{MeaningId, PhraseId},
};
use womanslation_database::store::{MeaningStore, VoteStore};

use crate::{
    api::{
        errors::{EndpointResponseBuilder, EndpointResult},
        openapi,
        traits::IntoApiModel,
        voter::VoterIdentity,
    },
    state::ApplicationState,
};



/// Get the meanings of a phrase
///
/// Meanings are returned in creation order, each with its like count
/// and whether the caller has liked it.
#[utoipa::path(
    get,
    path = "/phrases/{phrase_id}/meanings",
    tag = "phrases:meanings",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase.")
    ),
    responses(
        (
            status = 200,
            description = "Meanings of the phrase.",
            body = Vec<MeaningWithVotes>,
        ),
        openapi::InvalidRequest,
        openapi::MeaningsNotFound,
        openapi::InternalServerError,
    )
)]
#[get("/{phrase_id}/meanings")]
pub async fn get_phrase_meanings(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<PhraseId>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let phrase_id = parameters.into_inner();


    let meanings =
        MeaningStore::get_by_phrase_id(&mut database_connection, phrase_id, voter.voter_ip())
            .await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(
            meanings
                .into_iter()
                .map(IntoApiModel::into_api_model)
                .collect::<Vec<MeaningWithVotes>>(),
        ))
        .build()
}



/// Add a meaning to a phrase
///
/// Fails if the phrase already has a meaning with the same text and tone.
#[utoipa::path(
    post,
    path = "/phrases/{phrase_id}/meanings",
    tag = "phrases:meanings",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase.")
    ),
    request_body(
        content = MeaningCreationRequest
    ),
    responses(
        (
            status = 200,
            description = "The meaning has been added.",
            body = MeaningWithVotes,
        ),
        openapi::InvalidRequest,
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[post("/{phrase_id}/meanings")]
pub async fn create_phrase_meaning(
    state: ApplicationState,
    parameters: web::Path<PhraseId>,
    request_body: web::Json<MeaningCreationRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let phrase_id = parameters.into_inner();


    let created_meaning =
        MeaningStore::create(&mut database_connection, phrase_id, request_body.into_inner())
            .await?;

    info!(
        phrase_id = %phrase_id,
        meaning_id = %created_meaning.meaning.id,
        "Added meaning to phrase."
    );


    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Meaning added successfully",
            created_meaning.into_api_model(),
        )
        .build()
}



/// Delete all meanings of a phrase
///
/// Also deletes every vote cast on the phrase's meanings.
#[utoipa::path(
    delete,
    path = "/phrases/{phrase_id}/meanings",
    tag = "phrases:meanings",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase.")
    ),
    responses(
        (
            status = 200,
            description = "The meanings have been deleted.",
            body = MeaningsDeletionResponse,
        ),
        openapi::InvalidRequest,
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[delete("/{phrase_id}/meanings")]
pub async fn delete_all_phrase_meanings(
    state: ApplicationState,
    parameters: web::Path<PhraseId>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let phrase_id = parameters.into_inner();


    let deleted_meanings = MeaningStore::delete_all_for_phrase(&mut transaction, phrase_id).await?;
    let deleted_votes = VoteStore::delete_by_phrase_id(&mut transaction, phrase_id).await?;

    transaction.commit().await?;


    info!(
        phrase_id = %phrase_id,
        deleted_meanings,
        deleted_votes,
        "Deleted all meanings of phrase."
    );

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            format!("All meanings for phrase {phrase_id} deleted successfully"),
            MeaningsDeletionResponse {
                deleted_meanings,
                deleted_votes,
            },
        )
        .build()
}



/// Update a meaning
///
/// Replaces the meaning text, tone, confidence and warning level.
/// The meaning keeps its ID, creation date and votes.
#[utoipa::path(
    put,
    path = "/phrases/{phrase_id}/meanings/{meaning_id}",
    tag = "phrases:meanings",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase."),
        ("meaning_id" = MeaningId, Path, description = "ID of the meaning to update.")
    ),
    request_body(
        content = MeaningUpdateRequest
    ),
    responses(
        (
            status = 200,
            description = "The updated meaning.",
            body = MeaningWithVotes,
        ),
        openapi::InvalidRequest,
        openapi::MeaningNotFound,
        openapi::InternalServerError,
    )
)]
#[put("/{phrase_id}/meanings/{meaning_id}")]
pub async fn update_phrase_meaning(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<(PhraseId, MeaningId)>,
    request_body: web::Json<MeaningUpdateRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let (phrase_id, meaning_id) = parameters.into_inner();


    let updated_meaning = MeaningStore::update(
        &mut database_connection,
        phrase_id,
        meaning_id,
        request_body.into_inner(),
        voter.voter_ip(),
    )
    .await?;

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Meaning updated successfully",
            updated_meaning.into_api_model(),
        )
        .build()
}


/// Delete a meaning
///
/// Also deletes every vote cast on the meaning.
#[utoipa::path(
    delete,
    path = "/phrases/{phrase_id}/meanings/{meaning_id}",
    tag = "phrases:meanings",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase."),
        ("meaning_id" = MeaningId, Path, description = "ID of the meaning to delete.")
    ),
    responses(
        (
            status = 200,
            description = "The meaning has been deleted.",
            body = MeaningDeletionResponse,
        ),
        openapi::InvalidRequest,
        openapi::MeaningNotFound,
        openapi::InternalServerError,
    )
)]
#[delete("/{phrase_id}/meanings/{meaning_id}")]
pub async fn delete_phrase_meaning(
    state: ApplicationState,
    parameters: web::Path<(PhraseId, MeaningId)>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let (phrase_id, meaning_id) = parameters.into_inner();


    MeaningStore::delete(&mut transaction, phrase_id, meaning_id).await?;
    let deleted_votes = VoteStore::delete_by_meaning_id(&mut transaction, meaning_id).await?;

    transaction.commit().await?;


    info!(
        phrase_id = %phrase_id,
        meaning_id = %meaning_id,
        deleted_votes,
        "Deleted meaning."
    );

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Meaning deleted successfully",
            MeaningDeletionResponse { deleted_votes },
        )
        .build()
}
