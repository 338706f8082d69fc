use std::net::{IpAddr, SocketAddr};

use actix_http::Method;
use actix_web::{middleware::NormalizePath, test as actix_test, web, App};
use serde::Serialize;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::{Mutex, MutexGuard};
use womanslation::{
    api::{
        api_router,
        json_extractor_configuration,
        path_extractor_configuration,
        query_extractor_configuration,
    },
    state::{ApplicationState, ApplicationStateInner},
};
use womanslation_configuration::Configuration;
use womanslation_database::MIGRATOR;

use crate::TestResponse;


pub const TEST_DATABASE_URL_ENVIRONMENT_VARIABLE: &str = "WOMANSLATION_TEST_DATABASE_URL";

const TEST_CONFIGURATION: &str = r#"
[logging]
console_output_level_filter = "warn"
log_file_output_level_filter = "warn"
log_file_output_directory = "./logs"

[http]
host = "127.0.0.1"
port = 8088
allowed_cors_origin = "http://localhost"

[database]
host = "localhost"
port = 5432
username = "womanslation"
database_name = "womanslation_test"

[seeding]
seed_example_phrases_when_empty = false
"#;


/// Every test wipes the tables it runs against, so only one may hold the database at a time.
static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());



pub struct TestServer {
    state: ApplicationState,
    _database_guard: MutexGuard<'static, ()>,
}

impl TestServer {
    pub fn database_pool(&self) -> &PgPool {
        &self.state.database_pool
    }

    pub fn request<P>(&self, method: Method, path: P) -> TestRequestBuilder<'_>
    where
        P: Into<String>,
    {
        TestRequestBuilder {
            server: self,
            method,
            path: path.into(),
            voter_ip: None,
            forwarded_for: None,
            json_body: None,
        }
    }

    async fn reset_database(&self) {
        sqlx::query(
            "TRUNCATE TABLE womanslation.meaning_vote, womanslation.phrase_meaning, womanslation.phrase",
        )
        .execute(self.database_pool())
        .await
        .expect("failed to truncate test database tables");
    }
}



pub struct TestRequestBuilder<'s> {
    server: &'s TestServer,
    method: Method,
    path: String,
    voter_ip: Option<IpAddr>,
    forwarded_for: Option<String>,
    json_body: Option<serde_json::Value>,
}

impl<'s> TestRequestBuilder<'s> {
    /// Sets the peer address the request appears to come from.
    pub fn from_voter<I>(mut self, ip: I) -> Self
    where
        I: Into<IpAddr>,
    {
        self.voter_ip = Some(ip.into());
        self
    }

    pub fn with_forwarded_for<S>(mut self, header_value: S) -> Self
    where
        S: Into<String>,
    {
        self.forwarded_for = Some(header_value.into());
        self
    }

    pub fn with_json_body<B>(mut self, body: B) -> Self
    where
        B: Serialize,
    {
        self.json_body =
            Some(serde_json::to_value(body).expect("failed to serialize request body"));
        self
    }

    pub async fn send(self) -> TestResponse {
        let application = actix_test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(json_extractor_configuration())
                .app_data(path_extractor_configuration())
                .app_data(query_extractor_configuration())
                .app_data(self.server.state.clone())
                .service(api_router()),
        )
        .await;


        let mut request = actix_test::TestRequest::default()
            .method(self.method)
            .uri(&self.path);

        if let Some(voter_ip) = self.voter_ip {
            request = request.peer_addr(SocketAddr::new(voter_ip, 41234));
        }

        if let Some(forwarded_for) = self.forwarded_for {
            request = request.insert_header(("X-Forwarded-For", forwarded_for));
        }

        if let Some(json_body) = self.json_body {
            request = request.set_json(json_body);
        }


        let response = actix_test::call_service(&application, request.to_request()).await;

        TestResponse::from_service_response(response).await
    }
}



fn test_database_url(environment_value: Option<String>) -> String {
    environment_value.unwrap_or_else(|| {
        panic!(
            "{TEST_DATABASE_URL_ENVIRONMENT_VARIABLE} is not set, \
            end-to-end tests need a PostgreSQL database to run against"
        )
    })
}


/// Connects to the test database, migrates it and empties it.
///
/// # Panics
/// When `WOMANSLATION_TEST_DATABASE_URL` is not set or the database is unreachable.
pub async fn initialize_test_server() -> TestServer {
    let database_url =
        test_database_url(std::env::var(TEST_DATABASE_URL_ENVIRONMENT_VARIABLE).ok());

    let database_guard = DATABASE_LOCK.lock().await;


    let configuration = Configuration::from_toml_str(TEST_CONFIGURATION, "configuration.test.toml")
        .expect("failed to parse test configuration");

    let database_pool: PgPool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&database_url)
        .await
        .expect("failed to connect to the test database");

    MIGRATOR
        .run(&database_pool)
        .await
        .expect("failed to migrate the test database");


    let server = TestServer {
        state: web::Data::new(ApplicationStateInner::new(
            configuration,
            database_pool,
        )),
        _database_guard: database_guard,
    };

    server.reset_database().await;

    server
}



/// Percent-encodes a single path segment, such as phrase text used in `/by-text/{text}`.
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());

    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    encoded
}
