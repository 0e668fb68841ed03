use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use scoreboard_admin::run;
use scoreboard_admin::config::settings::get_config;
use scoreboard_admin::db::PgMatchStore;
use scoreboard_admin::services::ResultInferenceAdapter;
use scoreboard_admin::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "scoreboard-admin".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    // The key is read per request, a missing one only disables inference
    if config.gemini.read_api_key().is_none() {
        tracing::warn!(
            "{} is not set, result inference will fail with a configuration error",
            config.gemini.api_key_env
        );
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Starting scoreboard admin on {}", address);

    run(
        listener,
        Arc::new(PgMatchStore::new(connection_pool)),
        ResultInferenceAdapter::new(config.gemini),
    )?.await
}
