//! User-facing message rendering.
//!
//! Every string the bot posts or replies with is built here, so the
//! commands and the lifecycle controller share one wording.

use crate::schedule;
use crate::tally::ReactionTally;
use chrono::NaiveTime;
use std::fmt::Write as _;
use tryhard_common::{format_delay, format_hour_label, format_hour_minute};
use tryhard_config::PollState;

/// Reply for an `heure` argument that does not parse as HH:MM.
pub const INVALID_FORMAT_TEXT: &str = "Utilise le format HH:MM (ex: 21:00)";

/// Content of the poll message, with the three vote affordances spelled
/// out under the question.
pub fn poll_announcement(session_time: NaiveTime, role_mention: &str) -> String {
    format!(
        "🗳️ **Qui est chaud pour une session tryhard Valorant à {} ? {} **\n\n\
         ✅ Oui\n❌ Non\n🤔 Plus tard (max 1h)",
        format_hour_label(session_time),
        role_mention,
    )
}

/// Channel announcement linking the closed poll.
pub fn close_announcement(jump_url: &str) -> String {
    format!("Sondage du jour terminé ! Voir {jump_url}")
}

/// Result summary the poll message is overwritten with at close time.
pub fn results_summary(
    closed_at: NaiveTime,
    session_time: NaiveTime,
    tally: &ReactionTally,
) -> String {
    let mut text = format!(
        "**[🛑 Sondage fermé à {} pour la session de {}]**\n\n",
        format_hour_minute(closed_at),
        format_hour_minute(session_time),
    );

    if tally.is_empty() {
        text.push_str("**Aucun(e) participant(e)**\n\n");
    } else {
        text.push_str("__Résultats :__\n\n");
        for (choice, names) in tally.iter() {
            let _ = writeln!(text, "{} {} : {}", names.len(), choice, names.join(", "));
        }
    }

    text
}

/// Status text shared by the start confirmation and the info command.
pub fn info_text(state: &PollState, close_delay_seconds: u32, debug_close: bool) -> String {
    if !state.poll_active {
        return "❌ **Aucune session tryhard n'est prévue aujourd'hui**\n\n\
                💡 Pour envoyer le sondage, utilisez `/askfortryhardtoday 22:00` par exemple"
            .to_string();
    }

    let close_time = state
        .close_time
        .unwrap_or_else(|| schedule::close_time_for(state.session_time, close_delay_seconds));

    let mut text = String::from("**Voici la configuration actuelle :**\n");
    let _ = writeln!(
        text,
        "🕐 Heure de session : {}",
        format_hour_minute(state.session_time)
    );

    if debug_close {
        text.push_str("🔒 Fermeture du sondage en mode DEBUG (10 secondes)\n");
        text.push_str("⚠️ **MODE DEBUG ACTIVÉ** - Le sondage se fermera dans 10 secondes");
    } else {
        let _ = write!(
            text,
            "🔒 Fermeture du sondage {} avant la session ({})",
            format_delay(u64::from(close_delay_seconds)),
            format_hour_minute(close_time),
        );
    }

    text
}

/// Rejection text when a poll is already open, carrying the current status.
pub fn already_active_text(status: &str) -> String {
    format!("Un sondage est déjà actif aujourd'hui.\n\n{status}")
}

/// Rejection text when the requested session can no longer be polled.
pub fn time_passed_text(requested: NaiveTime, minimum: NaiveTime) -> String {
    format!(
        "L'heure {} est déjà passée. L'heure minimum est {}",
        format_hour_minute(requested),
        format_hour_minute(minimum),
    )
}
