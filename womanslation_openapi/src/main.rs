use std::net::Ipv4Addr;

use actix_web::{App, HttpServer};
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use utoipa::{openapi::OpenApi, OpenApi as OpenApiDerivable};
use utoipa_rapidoc::RapiDoc;
use womanslation::api::v1::{health, phrases, votes};
use womanslation::logging::initialize_tracing;
use womanslation_core::api_models;


#[derive(OpenApiDerivable)]
#[openapi(
    paths(
        /***
         * Annotated paths are relative to `womanslation/src/api/v1`.
         */

        // womanslation::api::v1::health
        health::ping,


        // womanslation::api::v1::phrases::endpoints::phrase
        phrases::get_phrases,
        phrases::create_phrase,
        phrases::search_phrases_by_text,
        phrases::search_phrases_by_tag,
        phrases::get_phrase_by_text,
        phrases::get_phrase_by_id,
        phrases::update_phrase,
        phrases::view_phrase,
        phrases::delete_phrase,

        // womanslation::api::v1::phrases::endpoints::meaning
        phrases::get_phrase_meanings,
        phrases::create_phrase_meaning,
        phrases::delete_all_phrase_meanings,
        phrases::update_phrase_meaning,
        phrases::delete_phrase_meaning,

        // womanslation::api::v1::phrases::endpoints::vote
        phrases::cast_vote,
        phrases::delete_vote,


        // womanslation::api::v1::votes
        votes::get_own_likes,
    ),
    components(
        schemas(
            // womanslation_core::id
            womanslation_core::id::PhraseId,
            womanslation_core::id::MeaningId,
            womanslation_core::id::VoteId,

            // womanslation_core::tone
            womanslation_core::tone::Tone,

            // womanslation_core::api_models::health
            api_models::PingResponse,

            // womanslation_core::api_models::phrases
            api_models::Phrase,
            api_models::PhraseCreationRequest,
            api_models::PhraseUpdateRequest,
            api_models::PhraseSortOrder,
            api_models::PhraseDeletionResponse,

            // womanslation_core::api_models::meanings
            api_models::MeaningWithVotes,
            api_models::MeaningCreationRequest,
            api_models::MeaningUpdateRequest,
            api_models::MeaningDeletionResponse,
            api_models::MeaningsDeletionResponse,

            // womanslation_core::api_models::votes
            api_models::Vote,
            api_models::VoteCastResponse,
        ),
    ),
    info(
        title = "Womanslation API",
        description = "Phrases, what they might really mean, and which interpretations people agree with.\n\n\
                       Every response body is an envelope of the form \
                       `{ \"success\": bool, \"message\": string | null, \"data\": any | null }`; \
                       the schemas below describe its `data` field.",
    ),
    servers(
        (
            url = "http://127.0.0.1:8088/api/v1/",
            description = "Local development server"
        )
    ),
    tags(
        (name = "health", description = "Liveness checks."),
        (name = "phrases", description = "Phrases and their searches."),
        (name = "phrases:meanings", description = "Interpretations of a phrase."),
        (name = "phrases:votes", description = "Likes on interpretations, one per voter and meaning."),
    )
)]
struct APIDocumentation;



fn remove_duplicated_summary_from_description(summary: &str, description: &mut String) {
    if description.starts_with(summary) {
        *description = description[summary.len()..].trim_start().to_string();
    }
}

/// `utoipa` uses the first doc comment line as the summary and the whole
/// doc comment as the description, which repeats the summary.
fn clean_up_documentation(documentation: &mut OpenApi) {
    for path in documentation.paths.paths.values_mut() {
        for operation in path.operations.values_mut() {
            let (Some(summary), Some(description)) =
                (operation.summary.as_ref(), operation.description.as_mut())
            else {
                continue;
            };

            remove_duplicated_summary_from_description(summary, description);
        }
    }
}


#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize logging and tracing.
    let guard = initialize_tracing(
        EnvFilter::builder().from_env_lossy(),
        EnvFilter::builder().from_env_lossy(),
        "./logs",
        "womanslation-openapi.log",
    )
    .into_diagnostic()
    .wrap_err("Failed to initialize tracing.")?;

    // Initialize compile-time generated OpenApi documentation.
    let mut open_api: OpenApi = APIDocumentation::openapi();
    clean_up_documentation(&mut open_api);

    // Start actix HTTP server to serve the documentation.
    // The interactive documentation page will be served at `/api-documentation`,
    // and the OpenAPI JSON file at `/api-documentation/openapi.json`.

    let server = HttpServer::new(move || {
        App::new().wrap(TracingLogger::default()).service(
            RapiDoc::with_openapi(
                "/api-documentation/openapi.json",
                open_api.clone(),
            )
            .path("/api-documentation"),
        )
    })
    .bind((Ipv4Addr::LOCALHOST, 8877))
    .into_diagnostic()
    .wrap_err("Failed to set up actix HTTP server.")?;

    info!("HTTP server initialized, running.");

    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;

    drop(guard);
    Ok(())
}
