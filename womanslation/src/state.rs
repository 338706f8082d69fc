//! Application-wide state (shared between endpoint functions).

use actix_web::web::Data;
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use womanslation_configuration::Configuration;



/// Central application state.
///
/// Use [`ApplicationState`] instead as it already wraps this struct
/// in [`actix_web::web::Data`]!
pub struct ApplicationStateInner {
    /// The configuration that this server was loaded with.
    pub configuration: Configuration,

    /// PostgreSQL database connection pool.
    pub database_pool: PgPool,
}

impl ApplicationStateInner {
    pub fn new(configuration: Configuration, database_pool: PgPool) -> Self {
        Self {
            configuration,
            database_pool,
        }
    }

    #[inline]
    pub async fn acquire_database_connection(
        &self,
    ) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.database_pool.acquire().await
    }
}


/// Central application state, wrapped in an actix [`Data`] wrapper.
///
/// This enables usage in endpoint functions.
/// See <https://actix.rs/docs/application#state> for more information.
///
/// # Examples
/// ```no_run
/// # use actix_web::{get, web};
/// # use womanslation::api::errors::EndpointResult;
/// # use womanslation::state::ApplicationState;
/// #[get("")]
/// pub async fn some_endpoint(
///     state: ApplicationState,
/// ) -> EndpointResult {
///     let mut database_connection = state.acquire_database_connection().await?;
///     # todo!();
/// }
/// ```
pub type ApplicationState = Data<ApplicationStateInner>;
