//! `shelf-bot` -- Telegram front-end for the reading diary.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default                    |
//! |---------------------|----------|----------------------------|
//! | `TELEGRAM_TOKEN`    | yes      | --                         |
//! | `TELEGRAM_API_URL`  | no       | `https://api.telegram.org` |
//! | `POLL_TIMEOUT_SECS` | no       | `30`                       |
//! | `DATABASE_URL` or `POSTGRES_*` | yes | --                 |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_bot::config::BotConfig;
use shelf_bot::polling;
use shelf_bot::telegram::TelegramClient;
use shelf_db::DatabaseConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_bot=info,shelf_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env().expect("Invalid bot configuration");
    let db_config = DatabaseConfig::from_env().expect("Invalid database configuration");

    let pool = shelf_db::create_pool(&db_config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    shelf_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let client = TelegramClient::new(&config.api_url, &config.token);
    tracing::info!(poll_timeout_secs = config.poll_timeout_secs, "Starting shelf-bot");

    tokio::select! {
        () = polling::run(&client, &pool, config.poll_timeout_secs) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            }
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
    }

    pool.close().await;
    tracing::info!("Shutdown complete");
}
