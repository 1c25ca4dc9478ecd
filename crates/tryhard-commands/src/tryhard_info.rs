//! Status command: read-only view of the current poll configuration.

use crate::framework::{send_embed, Context, Error};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Affiche les informations actuelles de configuration
#[poise::command(slash_command, rename = "tryhardinfo", guild_only)]
pub async fn tryhard_info(ctx: Context<'_>) -> Result<(), Error> {
    info!(
        user = %ctx.author().name,
        user_id = ctx.author().id.get(),
        "tryhardinfo invoked"
    );

    let status = ctx.data().poll.status_text().await;
    send_embed(
        ctx,
        serenity::CreateEmbed::new()
            .description(status)
            .colour(serenity::Colour::BLUE),
    )
    .await
}
