//! Poise framework setup and command registration logic.

use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::error;
use tryhard_config::Config;
use tryhard_poll::PollController;

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Poll lifecycle controller.
    pub poll: Arc<PollController>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Creates a new Poise framework with the poll commands registered.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: vec![
            crate::ask_for_tryhard_today::ask_for_tryhard_today(),
            crate::tryhard_info::tryhard_info(),
        ],
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    })
}

/// Global error handler for the framework.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {error:?}", ctx.command().name);
        }
        error => {
            error!("Framework error: {error:?}");
        }
    }
}

/// Sends an embed as an ephemeral reply to the invoking user.
pub(crate) async fn send_embed(
    ctx: Context<'_>,
    embed: serenity::CreateEmbed,
) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Builds the red embed every command rejection uses.
pub(crate) fn error_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .colour(serenity::Colour::RED)
}
