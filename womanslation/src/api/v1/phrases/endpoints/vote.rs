use actix_web::{delete, post, web};
use sqlx::Connection;
use tracing::info;
use womanslation_core::{
    api_models::{ResponseEnvelope, VoteCastResponse, VoteRequest},
    id::{MeaningId, PhraseId, VoteId},
};
use womanslation_database::store::VoteStore;

use crate::{
    api::{
        errors::{EndpointResponseBuilder, EndpointResult},
        openapi,
        traits::IntoApiModel,
        voter::VoterIdentity,
    },
    state::ApplicationState,
};



/// Like or unlike a meaning
///
/// Each voter (identified by their IP address) has at most one vote per meaning:
/// voting again overwrites the previous vote.
#[utoipa::path(
    post,
    path = "/phrases/{phrase_id}/meanings/{meaning_id}/vote",
    tag = "phrases:votes",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase."),
        ("meaning_id" = MeaningId, Path, description = "ID of the meaning to vote on."),
        VoteRequest
    ),
    responses(
        (
            status = 200,
            description = "The vote has been cast or changed.",
            body = VoteCastResponse,
        ),
        openapi::InvalidRequest,
        openapi::MeaningNotFound,
        openapi::InternalServerError,
    )
)]
#[post("/{phrase_id}/meanings/{meaning_id}/vote")]
pub async fn cast_vote(
    state: ApplicationState,
    voter: VoterIdentity,
    parameters: web::Path<(PhraseId, MeaningId)>,
    vote_request: web::Query<VoteRequest>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let mut transaction = database_connection.begin().await?;

    let (phrase_id, meaning_id) = parameters.into_inner();


    let upserted_vote = VoteStore::create_or_update(
        &mut transaction,
        phrase_id,
        meaning_id,
        voter.voter_ip(),
        vote_request.like,
    )
    .await?;

    let like_count = VoteStore::count_likes(&mut transaction, meaning_id).await?;

    transaction.commit().await?;


    let message = if upserted_vote.newly_created {
        info!(
            meaning_id = %meaning_id,
            like = upserted_vote.vote.like,
            "Vote cast."
        );

        "Vote created successfully"
    } else {
        "Vote Updated successfully"
    };

    EndpointResponseBuilder::ok()
        .with_data_and_message(
            message,
            VoteCastResponse {
                vote: upserted_vote.vote.into_api_model(),
                newly_created: upserted_vote.newly_created,
                like_count,
            },
        )
        .build()
}


/// Delete a vote
#[utoipa::path(
    delete,
    path = "/phrases/{phrase_id}/meanings/{meaning_id}/vote/{vote_id}",
    tag = "phrases:votes",
    params(
        ("phrase_id" = PhraseId, Path, description = "ID of the phrase."),
        ("meaning_id" = MeaningId, Path, description = "ID of the meaning."),
        ("vote_id" = VoteId, Path, description = "ID of the vote to delete.")
    ),
    responses(
        (
            status = 200,
            description = "The vote has been deleted.",
            example = json!({ "success": true, "message": "Vote deleted successfully", "data": null })
        ),
        openapi::InvalidRequest,
        openapi::VoteNotFound,
        openapi::InternalServerError,
    )
)]
#[delete("/{phrase_id}/meanings/{meaning_id}/vote/{vote_id}")]
pub async fn delete_vote(
    state: ApplicationState,
    parameters: web::Path<(PhraseId, MeaningId, VoteId)>,
) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;
    let (_, _, vote_id) = parameters.into_inner();


    VoteStore::delete(&mut database_connection, vote_id).await?;

    info!(vote_id = %vote_id, "Deleted vote.");

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success_without_data(
            "Vote deleted successfully",
        ))
        .build()
}
