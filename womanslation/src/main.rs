use actix_web::{web, HttpServer};
use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;
use womanslation::api::{
    api_router,
    json_extractor_configuration,
    path_extractor_configuration,
    query_extractor_configuration,
};
use womanslation::cli::CLIArgs;
use womanslation::establish_database_connection_pool_with_retry;
use womanslation::logging::initialize_tracing;
use womanslation::seed::seed_example_phrases_if_empty;
use womanslation::state::ApplicationStateInner;
use womanslation_configuration::Configuration;
use womanslation_database::MIGRATOR;



#[tokio::main]
async fn main() -> Result<()> {
    // A `.env` file is optional; it is mostly used to provide `DATABASE_URL` in development.
    let _ = dotenvy::dotenv();

    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    let guard = initialize_tracing(
        configuration
            .logging
            .console_output_level_filter()
            .into_diagnostic()?,
        configuration
            .logging
            .log_file_output_level_filter()
            .into_diagnostic()?,
        &configuration.logging.log_file_output_directory,
        "womanslation.log",
    )
    .into_diagnostic()
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = %configuration.configuration_file_path.display(),
        "Configuration loaded."
    );


    // Connect to the database, then migrate and seed it if needed.
    let database_pool = establish_database_connection_pool_with_retry(&configuration.database)
        .await
        .into_diagnostic()
        .wrap_err("Failed to connect to the database.")?;

    if arguments.apply_pending_migrations {
        info!("Applying pending database migrations.");

        MIGRATOR
            .run(&database_pool)
            .await
            .into_diagnostic()
            .wrap_err("Failed to apply pending database migrations.")?;
    }

    if configuration.seeding.seed_example_phrases_when_empty {
        let mut database_connection = database_pool
            .acquire()
            .await
            .into_diagnostic()
            .wrap_err("Failed to acquire a database connection for seeding.")?;

        seed_example_phrases_if_empty(&mut database_connection)
            .await
            .into_diagnostic()
            .wrap_err("Failed to seed the database.")?;
    }


    let state = web::Data::new(ApplicationStateInner::new(
        configuration.clone(),
        database_pool,
    ));


    // Initialize and start the actix HTTP server.
    let allowed_cors_origin = configuration.http.allowed_cors_origin.clone();

    #[rustfmt::skip]
    let server = HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allowed_origin(&allowed_cors_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .expose_headers(vec![
                "Date",
                "Content-Type",
                "Content-Length",
            ]);

        actix_web::App::new()
            .wrap(actix_web::middleware::NormalizePath::trim())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(json_extractor_configuration())
            .app_data(path_extractor_configuration())
            .app_data(query_extractor_configuration())
            .app_data(state.clone())
            .service(api_router())
    })
        .bind((
            configuration.http.host.as_str(),
            configuration.http.port,
        ))
        .into_diagnostic()
        .wrap_err("Failed to set up actix HTTP server.")?;

    info!(
        host = configuration.http.host.as_str(),
        port = configuration.http.port,
        "HTTP server initialized and running."
    );

    // Run HTTP server until stopped.
    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;


    drop(guard);

    Ok(())
}
