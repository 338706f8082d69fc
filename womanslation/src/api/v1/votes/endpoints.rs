use actix_web::get;
use womanslation_core::api_models::{ResponseEnvelope, Vote};
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


/// List the caller's likes
///
/// Returns every meaning the caller (identified by their IP address) currently likes.
/// Clients use this to highlight liked meanings without refetching phrases.
#[utoipa::path(
    get,
    path = "/votes/mine",
    tag = "phrases:votes",
    responses(
        (
            status = 200,
            description = "Likes cast by the caller.",
            body = Vec<Vote>,
        ),
        openapi::InternalServerError,
    )
)]
#[get("/mine")]
pub async fn get_own_likes(state: ApplicationState, voter: VoterIdentity) -> EndpointResult {
    let mut database_connection = state.acquire_database_connection().await?;


    let likes = VoteStore::get_by_ip(&mut database_connection, voter.voter_ip()).await?;

    EndpointResponseBuilder::ok()
        .with_json_body(ResponseEnvelope::success(
            likes
                .into_iter()
                .map(IntoApiModel::into_api_model)
                .collect::<Vec<Vote>>(),
        ))
        .build()
}
