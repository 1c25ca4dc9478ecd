//! Main entry point for the tryhard poll bot.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tryhard_bot::{BotResult, TryhardBot};
use tryhard_config::ConfigLoader;

/// Log file receiving the persistent copy of the bot's activity.
const LOG_FILE: &str = "bot.log";

#[tokio::main]
async fn main() -> BotResult<()> {
    // A .env file is honored but optional.
    dotenvy::dotenv().ok();

    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    info!("Starting tryhard poll bot");

    let config = ConfigLoader::from_env()?;
    config.validate()?;

    let bot = TryhardBot::new(config);
    if let Err(e) = bot.start().await {
        error!("Bot failed to start: {}", e);
        return Err(e);
    }

    Ok(())
}
