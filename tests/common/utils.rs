use once_cell::sync::Lazy;
use secrecy::ExposeSecret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use scoreboard_admin::config::gemini::GeminiSettings;
use scoreboard_admin::config::settings::{get_config, DatabaseSettings};
use scoreboard_admin::run;
use scoreboard_admin::services::ResultInferenceAdapter;
use scoreboard_admin::telemetry::{get_subscriber, init_subscriber};

use crate::common::memory_store::InMemoryMatchStore;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryMatchStore>,
}

/// App over an empty store with inference pointed nowhere useful.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(
        InMemoryMatchStore::default(),
        gemini_settings_with_key("http://127.0.0.1:9/unreachable"),
    )
    .await
}

pub async fn spawn_app_with(store: InMemoryMatchStore, gemini: GeminiSettings) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(store);
    let server = run(
        listener,
        store.clone(),
        ResultInferenceAdapter::new(gemini),
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
    }
}

/// Settings reading the key from a variable unique to the calling test, set
/// to a dummy key.
pub fn gemini_settings_with_key(api_url: &str) -> GeminiSettings {
    let settings = gemini_settings_without_key(api_url);
    std::env::set_var(&settings.api_key_env, "test-gemini-key");
    settings
}

/// Settings pointing at a variable nobody sets.
pub fn gemini_settings_without_key(api_url: &str) -> GeminiSettings {
    GeminiSettings::new(
        api_url.to_string(),
        format!("SCOREBOARD_TEST_GEMINI_KEY_{}", Uuid::new_v4().simple()),
    )
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Fresh, migrated database named after a random UUID.
pub async fn spawn_test_database() -> PgPool {
    Lazy::force(&TRACING);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    configure_db(&configuration.database).await
}
