//! Core bot logic using the Poise framework.

use crate::error::{BotError, BotResult};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tryhard_commands::{create_framework, Data};
use tryhard_config::{Config, PollStore};
use tryhard_poll::{PollController, TIMEZONE};

/// Cadence of the periodic close check.
const CLOSE_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Period of the sweep that clears any poll the close check missed.
const DAILY_RESET_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Main bot structure.
pub struct TryhardBot {
    config: Arc<Config>,
}

impl TryhardBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Starts the bot and blocks until the gateway connection ends.
    pub async fn start(&self) -> BotResult<()> {
        let config = self.config.clone();
        let store = PollStore::new(config.storage.state_path.clone());
        let controller = Arc::new(PollController::new(config.clone(), store)?);

        let framework = create_framework()
            .setup(move |ctx, ready, framework| {
                let config = config.clone();
                let controller = controller.clone();
                Box::pin(async move {
                    info!(user = %ready.user.name, "bot connected");

                    let guild_id = serenity::GuildId::new(config.discord.guild_id.0);
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        guild_id,
                    )
                    .await?;
                    info!(guild_id = guild_id.get(), "slash commands registered");

                    // Revalidate any poll that was open when the process died.
                    controller.recover(&ctx.http).await?;

                    spawn_close_tick(controller.clone(), ctx.http.clone());
                    spawn_daily_reset(controller.clone());

                    Ok(Data {
                        config,
                        poll: controller,
                    })
                })
            })
            .build();

        let intents = serenity::GatewayIntents::GUILDS
            | serenity::GatewayIntents::GUILD_MESSAGES
            | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, intents)
            .framework(framework)
            .await
            .map_err(|e| BotError::Framework(format!("{e:?}")))?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            info!("shutdown signal received, stopping client");
            shard_manager.shutdown_all().await;
        });

        client
            .start()
            .await
            .map_err(|e| BotError::Framework(format!("{e:?}")))?;
        Ok(())
    }
}

/// Periodic close check, one tick per second for the lifetime of the
/// process. Errors are logged and the loop keeps running.
fn spawn_close_tick(controller: Arc<PollController>, http: Arc<serenity::Http>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLOSE_TICK_INTERVAL);
        loop {
            interval.tick().await;
            let now = chrono::Utc::now().with_timezone(&TIMEZONE);
            if let Err(e) = controller.tick(&http, now).await {
                warn!(error = %e, "close check failed");
            }
        }
    });
}

/// Daily sweep clearing any poll the close check missed. Sleeps before the
/// first firing so a poll recovered at startup survives.
fn spawn_daily_reset(controller: Arc<PollController>) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(DAILY_RESET_INTERVAL).await;
            if let Err(e) = controller.daily_reset().await {
                warn!(error = %e, "daily reset failed");
            }
        }
    });
}
