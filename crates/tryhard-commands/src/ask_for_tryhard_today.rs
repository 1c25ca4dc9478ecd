//! Start-poll command: opens today's tryhard poll for a given time of day.

use crate::framework::{error_embed, send_embed, Context, Error};
use chrono::{NaiveTime, Utc};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};
use tryhard_poll::messages;
use tryhard_poll::{StartPollError, TIMEZONE};

/// Default session time when the `heure` argument is omitted.
const DEFAULT_SESSION_TIME: &str = "21:00";

/// Lance un sondage tryhard pour aujourd'hui avec une heure optionnelle (21h par défaut)
#[poise::command(slash_command, rename = "askfortryhardtoday", guild_only)]
pub async fn ask_for_tryhard_today(
    ctx: Context<'_>,
    #[description = "Heure de la session au format HH:MM"] heure: Option<String>,
) -> Result<(), Error> {
    let heure = heure.unwrap_or_else(|| DEFAULT_SESSION_TIME.to_string());
    info!(
        user = %ctx.author().name,
        user_id = ctx.author().id.get(),
        heure = %heure,
        "askfortryhardtoday invoked"
    );

    let Ok(session_time) = NaiveTime::parse_from_str(&heure, "%H:%M") else {
        return send_embed(
            ctx,
            error_embed("❌ Format invalide", messages::INVALID_FORMAT_TEXT),
        )
        .await;
    };

    let data = ctx.data();
    let http = ctx.serenity_context().http.as_ref();
    let now = Utc::now().with_timezone(&TIMEZONE);

    match data.poll.start_poll(http, now, session_time).await {
        Ok(_started) => {
            let status = data.poll.status_text().await;
            let (title, colour) = if data.config.poll.debug_close {
                (
                    "🧪 Sondage tryhard lancé en MODE DEBUG !",
                    serenity::Colour::ORANGE,
                )
            } else {
                (
                    "✅ Sondage tryhard lancé avec succès !",
                    serenity::Colour::DARK_GREEN,
                )
            };
            send_embed(
                ctx,
                serenity::CreateEmbed::new()
                    .title(title)
                    .description(status)
                    .colour(colour),
            )
            .await
        }
        Err(StartPollError::AlreadyActive) => {
            let status = data.poll.status_text().await;
            send_embed(
                ctx,
                error_embed(
                    "❌ Sondage déjà en cours",
                    &messages::already_active_text(&status),
                ),
            )
            .await
        }
        Err(StartPollError::TimeAlreadyPassed { minimum }) => {
            send_embed(
                ctx,
                error_embed(
                    "❌ Impossible de lancer le sondage",
                    &messages::time_passed_text(session_time, minimum),
                ),
            )
            .await
        }
        Err(StartPollError::ChannelNotFound(channel_id)) => {
            send_embed(
                ctx,
                error_embed(
                    "❌ Erreur de configuration",
                    &format!("Channel {channel_id} introuvable"),
                ),
            )
            .await
        }
        Err(StartPollError::RoleNotFound(role_name)) => {
            send_embed(
                ctx,
                error_embed(
                    "❌ Erreur de configuration",
                    &format!("Rôle '{role_name}' introuvable"),
                ),
            )
            .await
        }
        Err(e) => {
            warn!(
                user_id = ctx.author().id.get(),
                error = %e,
                "poll creation failed"
            );
            send_embed(
                ctx,
                error_embed("❌ Erreur lors du lancement du sondage", &e.to_string()),
            )
            .await
        }
    }
}
