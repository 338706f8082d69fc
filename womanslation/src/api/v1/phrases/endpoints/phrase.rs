use actix_web::{delete, get, post, put, web};
use sqlx::Connection;
use tracing::info;
use womanslation_core::{
    api_models::{
        Phrase,
        PhraseCreationRequest,
        PhraseDeletionResponse,
        PhraseUpdateRequest,
        PhrasesListRequest,
        ResponseEnvelope,
    },
    id::PhraseId,
};
use womanslation_database::store::{PhraseStore, PhraseWithMeaningsModel, VoteStore};

use crate::{
    api::{
        errors::{EndpointResponseBuilder, EndpointResult},
        openapi,
        traits::IntoApiModel,
        voter::VoterIdentity,
    },
    state::ApplicationState,
};


fn into_api_phrases(phrases: Vec<PhraseWithMeaningsModel>) -> Vec<Phrase> {
    phrases
        .into_iter()
        .map(IntoApiModel::into_api_model)
        .collect()
}



/// List phrases
///
/// Returns one page of phrases (with their meanings), optionally filtered by
/// a case-insensitive substring of the text and by a comma-separated list of tags
/// (a phrase matches if it has any of them).
///
/// An empty page is a successful response.
#[utoipa::path(
    get,
    path = "/phrases",
    tag = "phrases",
    params(
        PhrasesListRequest
    ),
    responses(
        (
            status = 200,
            description = "A page of phrases.",
            body = Vec<Phrase>,
        ),
        openapi::InvalidRequest,
        openapi::InternalServerError,
    )
)]
#[get("")]
pub async fn get_phrases(
    state: ApplicationState,
    voter: VoterIdentity,
    list_request: web::Query<PhrasesListRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let list_request = list_request.into_inner();


    let phrases =
        PhraseStore::list(&mut database_connection, &list_request, voter.voter_ip()).await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(into_api_phrases(phrases)))
        .build()
}



/// Create a phrase
///
/// Creates the phrase together with any meanings included in the request.
/// Tags are trimmed and lower-cased before they are stored.
#[utoipa::path(
    post,
    path = "/phrases",
    tag = "phrases",
    request_body(
        content = PhraseCreationRequest
    ),
    responses(
        (
            status = 200,
            description = "The phrase has been created.",
            body = Phrase,
        ),
        openapi::InvalidRequest,
        openapi::InternalServerError,
    )
)]
#[post("")]
pub async fn create_phrase(
    state: ApplicationState,
    voter: VoterIdentity,
    request_body: web::Json<PhraseCreationRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;


    let created_phrase = PhraseStore::create(
        &mut database_connection,
        request_body.into_inner(),
        voter.voter_ip(),
    )
    .await?;

    info!(
        phrase_id = %created_phrase.phrase.id,
        meanings = created_phrase.meanings.len(),
        "Created new phrase."
    );


    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Phrase saved successfully",
            created_phrase.into_api_model(),
        )
        .build()
}



/// Search phrases by text
///
/// Case-insensitive substring match on the phrase text.
#[utoipa::path(
    get,
    path = "/phrases/search/text/{text}",
    tag = "phrases",
    params(
        ("text" = String, Path, description = "Text to search for.")
    ),
    responses(
        (
            status = 200,
            description = "Matching phrases, oldest first.",
            body = Vec<Phrase>,
        ),
        openapi::InternalServerError,
    )
)]
#[get("/search/text/{text}")]
pub async fn search_phrases_by_text(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<String>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let search_text = parameters.into_inner();


    let phrases =
        PhraseStore::search_by_text(&mut database_connection, &search_text, voter.voter_ip())
            .await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(into_api_phrases(phrases)))
        .build()
}


/// Search phrases by tag
///
/// Exact match on a single tag (after trimming and lower-casing it).
#[utoipa::path(
    get,
    path = "/phrases/search/tag/{tag}",
    tag = "phrases",
    params(
        ("tag" = String, Path, description = "Tag to search for.")
    ),
    responses(
        (
            status = 200,
            description = "Phrases carrying the tag, oldest first.",
            body = Vec<Phrase>,
        ),
        openapi::InternalServerError,
    )
)]
#[get("/search/tag/{tag}")]
pub async fn search_phrases_by_tag(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<String>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let tag = parameters.into_inner();


    let phrases =
        PhraseStore::search_by_tag(&mut database_connection, &tag, voter.voter_ip()).await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(into_api_phrases(phrases)))
        .build()
}



/// Get a phrase by its exact text
#[utoipa::path(
    get,
    path = "/phrases/by-text/{text}",
    tag = "phrases",
    params(
        ("text" = String, Path, description = "Exact phrase text.")
    ),
    responses(
        (
            status = 200,
            description = "The requested phrase.",
            body = Phrase,
        ),
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[get("/by-text/{text}")]
pub async fn get_phrase_by_text(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<String>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let phrase_text = parameters.into_inner();


    let phrase =
        PhraseStore::get_by_text(&mut database_connection, &phrase_text, voter.voter_ip())
            .await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(phrase.into_api_model()))
        .build()
}


/// Get a phrase by its ID
#[utoipa::path(
    get,
    path = "/phrases/{phrase_id}",
    tag = "phrases",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase.")
    ),
    responses(
        (
            status = 200,
            description = "The requested phrase.",
            body = Phrase,
        ),
        openapi::InvalidRequest,
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[get("/{phrase_id}")]
pub async fn get_phrase_by_id(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<PhraseId>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let phrase_id = parameters.into_inner();


    let phrase = PhraseStore::get_by_id(&mut database_connection, phrase_id, voter.voter_ip())
        .await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(phrase.into_api_model()))
        .build()
}



/// Update a phrase
///
/// Replaces the text, suggested response and tags of the phrase.
/// Views, meanings and the creation date are kept.
#[utoipa::path(
    put,
    path = "/phrases/{phrase_id}",
    tag = "phrases",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase to update.")
    ),
    request_body(
        content = PhraseUpdateRequest
    ),
    responses(
        (
            status = 200,
            description = "The updated phrase.",
            body = Phrase,
        ),
        openapi::InvalidRequest,
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[put("/{phrase_id}")]
pub async fn update_phrase(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<PhraseId>,
    request_body: web::Json<PhraseUpdateRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let phrase_id = parameters.into_inner();


    let updated_phrase = PhraseStore::update(
        &mut database_connection,
        phrase_id,
        request_body.into_inner(),
        voter.voter_ip(),
    )
    .await?;

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Phrase updated successfully",
            updated_phrase.into_api_model(),
        )
        .build()
}


/// Record a view of a phrase
///
/// Increments the view counter by exactly one, even under concurrent requests.
#[utoipa::path(
    put,
    path = "/phrases/{phrase_id}/view",
    tag = "phrases",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the viewed phrase.")
    ),
    responses(
        (
            status = 200,
            description = "The phrase, with its view counter already incremented.",
            body = Phrase,
        ),
        openapi::InvalidRequest,
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[put("/{phrase_id}/view")]
pub async fn view_phrase(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<PhraseId>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let phrase_id = parameters.into_inner();


    let viewed_phrase =
        PhraseStore::view(&mut database_connection, phrase_id, voter.voter_ip()).await?;

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Phrase viewed successfully",
            viewed_phrase.into_api_model(),
        )
        .build()
}


/// Delete a phrase
///
/// Deletes the phrase, all of its meanings and all votes on those meanings.
#[utoipa::path(
    delete,
    path = "/phrases/{phrase_id}",
    tag = "phrases",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase to delete.")
    ),
    responses(
        (
            status = 200,
            description = "The phrase has been deleted.",
            body = PhraseDeletionResponse,
        ),
        openapi::InvalidRequest,
        openapi::PhraseNotFound,
        openapi::InternalServerError,
    )
)]
#[delete("/{phrase_id}")]
pub async fn delete_phrase(
    state: ApplicationState,
    parameters: web::Path<PhraseId>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let phrase_id = parameters.into_inner();


    PhraseStore::delete(&mut transaction, phrase_id).await?;
    let deleted_votes = VoteStore::delete_by_phrase_id(&mut transaction, phrase_id).await?;

    transaction.commit().await?;


    info!(
        phrase_id = %phrase_id,
        deleted_votes,
        "Deleted phrase."
    );

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            "Phrase deleted successfully",
            PhraseDeletionResponse { deleted_votes },
        )
        .build()
}
