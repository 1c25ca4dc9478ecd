//! Poll lifecycle controller driving the `Idle → Open → Closed` transitions.

use crate::messages;
use crate::schedule;
use crate::tally::{ReactionTally, POLL_CHOICES};
use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::Mentionable;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use tryhard_common::{ChannelId, TryhardError};
use tryhard_config::{Config, PollState, PollStore};

/// Error surfaced to the invoking user when starting a poll fails.
#[derive(thiserror::Error, Debug)]
pub enum StartPollError {
    /// A poll is already open.
    #[error("a poll is already active")]
    AlreadyActive,

    /// The requested session (or its computed close) is already in the past.
    #[error("session time already passed, earliest acceptable is {minimum}")]
    TimeAlreadyPassed {
        /// Earliest session time that can still be polled.
        minimum: NaiveTime,
    },

    /// The configured channel does not exist or is not visible to the bot.
    #[error("channel {0} not found")]
    ChannelNotFound(ChannelId),

    /// The configured role does not exist in the guild.
    #[error("role '{0}' not found")]
    RoleNotFound(String),

    /// The platform rejected an operation.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// The state store rejected a write.
    #[error(transparent)]
    Store(#[from] TryhardError),
}

/// Summary of a successfully started poll, for the confirmation reply.
#[derive(Debug, Clone, Copy)]
pub struct StartedPoll {
    /// Planned session time.
    pub session_time: NaiveTime,
    /// Computed close time.
    pub close_time: NaiveTime,
}

/// Owns the poll state and drives every lifecycle transition.
///
/// All state access is serialized behind one async mutex, so a command
/// handler and the periodic close check can never interleave mid-mutation.
/// Every mutation is written through [`PollStore`] before the lock is
/// released; the store stays the single source of truth across restarts.
pub struct PollController {
    config: Arc<Config>,
    store: PollStore,
    state: Mutex<PollState>,
}

impl PollController {
    /// Creates a controller, loading (or initializing) the persisted state.
    pub fn new(config: Arc<Config>, store: PollStore) -> Result<Self, TryhardError> {
        let state = store.load()?;
        Ok(Self {
            config,
            store,
            state: Mutex::new(state),
        })
    }

    fn channel_id(&self) -> serenity::ChannelId {
        serenity::ChannelId::new(self.config.discord.channel_id.0)
    }

    fn guild_id(&self) -> serenity::GuildId {
        serenity::GuildId::new(self.config.discord.guild_id.0)
    }

    /// Renders the status text shared by both commands.
    pub async fn status_text(&self) -> String {
        let state = self.state.lock().await;
        messages::info_text(
            &state,
            self.config.poll.close_delay_seconds,
            self.config.poll.debug_close,
        )
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> PollState {
        self.state.lock().await.clone()
    }

    /// `Idle → Open`: validates the request, posts the poll message with its
    /// three reactions, computes the close time, and persists the new state
    /// in a single save once the message exists. Nothing is persisted on any
    /// failure path.
    pub async fn start_poll(
        &self,
        http: &serenity::Http,
        now: DateTime<Tz>,
        session_time: NaiveTime,
    ) -> Result<StartedPoll, StartPollError> {
        let mut state = self.state.lock().await;

        if state.has_active_poll() {
            return Err(StartPollError::AlreadyActive);
        }

        let delay = self.config.poll.close_delay_seconds;
        if !schedule::start_is_in_the_future(now, session_time, delay) {
            return Err(StartPollError::TimeAlreadyPassed {
                minimum: schedule::earliest_session_time(now, delay),
            });
        }

        self.channel_id()
            .to_channel(http)
            .await
            .map_err(|_| StartPollError::ChannelNotFound(self.config.discord.channel_id))?;

        let roles = self.guild_id().roles(http).await?;
        let role = roles
            .values()
            .find(|role| role.name == self.config.discord.role_name)
            .ok_or_else(|| StartPollError::RoleNotFound(self.config.discord.role_name.clone()))?;

        let content = messages::poll_announcement(session_time, &role.mention().to_string());
        let message = self
            .channel_id()
            .send_message(http, serenity::CreateMessage::new().content(content))
            .await?;
        for choice in POLL_CHOICES {
            message
                .react(http, serenity::ReactionType::Unicode(choice.to_string()))
                .await?;
        }

        let close_time = if self.config.poll.debug_close {
            schedule::debug_close_time(now)
        } else {
            schedule::close_time_for(session_time, delay)
        };

        state.session_time = session_time;
        state.poll_active = true;
        state.poll_message_id = Some(message.id.get());
        state.last_posted_date = Some(now.date_naive());
        state.close_time = Some(close_time);
        self.store.save(&state)?;

        info!(
            message_id = message.id.get(),
            session = %session_time,
            close = %close_time,
            "poll opened"
        );

        Ok(StartedPoll {
            session_time,
            close_time,
        })
    }

    /// One invocation of the periodic close check. A no-op unless a poll is
    /// open and `now` falls within the close window. The active flag is
    /// cleared in the same critical section as the close itself, so the
    /// transition runs at most once per poll.
    pub async fn tick(&self, http: &serenity::Http, now: DateTime<Tz>) -> Result<(), TryhardError> {
        let mut state = self.state.lock().await;

        if !state.poll_active {
            return Ok(());
        }
        let (Some(message_id), Some(close_time)) = (state.poll_message_id, state.close_time)
        else {
            return Ok(());
        };
        if !schedule::within_close_window(now, close_time) {
            return Ok(());
        }

        self.close_poll(http, &mut state, message_id, now).await
    }

    /// `Open → Closed → Idle`: tallies the reactions, publishes the results,
    /// and clears the persisted state.
    async fn close_poll(
        &self,
        http: &serenity::Http,
        state: &mut PollState,
        message_id: u64,
        now: DateTime<Tz>,
    ) -> Result<(), TryhardError> {
        let channel_id = self.channel_id();
        let message = match channel_id
            .message(http, serenity::MessageId::new(message_id))
            .await
        {
            Ok(message) => message,
            Err(e) => {
                // The poll message is gone or unreadable. Discard the poll so
                // the active flag cannot stay stuck.
                warn!(message_id, error = %e, "poll message unavailable at close, discarding poll");
                state.clear_poll();
                self.store.save(state)?;
                return Ok(());
            }
        };

        let tally = self.collect_tally(http, &message).await?;
        info!(
            session = %state.session_time,
            yes = tally.count("✅"),
            no = tally.count("❌"),
            later = tally.count("🤔"),
            "closing poll"
        );

        let summary = messages::results_summary(now.time(), state.session_time, &tally);

        channel_id
            .send_message(
                http,
                serenity::CreateMessage::new().content(messages::close_announcement(&message.link())),
            )
            .await
            .map_err(|e| TryhardError::discord(e.to_string()))?;

        // Stripping reactions and editing need MANAGE_MESSAGES; a missing
        // permission downgrades the close, it does not abort it.
        if let Err(e) = message.delete_reactions(http).await {
            warn!(message_id, error = %e, "could not clear poll reactions");
        }
        if let Err(e) = channel_id
            .edit_message(http, message.id, serenity::EditMessage::new().content(summary))
            .await
        {
            warn!(message_id, error = %e, "could not edit poll message with results");
        }

        state.clear_poll();
        self.store.save(state)?;
        Ok(())
    }

    /// Enumerates every reactor of the recognized choices, skipping bot
    /// accounts. Enumeration is paginated; names keep the order Discord
    /// returns them in.
    async fn collect_tally(
        &self,
        http: &serenity::Http,
        message: &serenity::Message,
    ) -> Result<ReactionTally, TryhardError> {
        let mut tally = ReactionTally::new();

        for reaction in &message.reactions {
            let emoji = reaction.reaction_type.to_string();
            if !POLL_CHOICES.contains(&emoji.as_str()) {
                continue;
            }

            let mut after: Option<serenity::UserId> = None;
            loop {
                let users = message
                    .reaction_users(http, reaction.reaction_type.clone(), Some(100), after)
                    .await
                    .map_err(|e| TryhardError::discord(e.to_string()))?;
                let page_len = users.len();
                after = users.last().map(|user| user.id);

                for user in users {
                    if user.bot {
                        continue;
                    }
                    tally.record(&emoji, user.display_name().to_string());
                }

                if page_len < 100 {
                    break;
                }
            }
        }

        Ok(tally)
    }

    /// Startup recovery: re-validates a persisted active poll against the
    /// live channel, clearing state that no longer matches a real message.
    pub async fn recover(&self, http: &serenity::Http) -> Result<(), TryhardError> {
        let mut state = self.state.lock().await;

        if !state.poll_active {
            debug!("no active poll to recover");
            return Ok(());
        }
        let Some(message_id) = state.poll_message_id else {
            warn!("active flag without a message id, clearing stale state");
            state.clear_poll();
            self.store.save(&state)?;
            return Ok(());
        };

        match self
            .channel_id()
            .message(http, serenity::MessageId::new(message_id))
            .await
        {
            Ok(message) if message.reactions.is_empty() => {
                warn!(message_id, "recovered poll has no reactions, treating as already closed");
                state.clear_poll();
                self.store.save(&state)?;
            }
            Ok(message) => {
                info!(
                    message_id,
                    reactions = message.reactions.len(),
                    "active poll recovered"
                );
            }
            Err(e) => {
                warn!(message_id, error = %e, "poll message unavailable, clearing stale state");
                state.clear_poll();
                self.store.save(&state)?;
            }
        }

        Ok(())
    }

    /// Unconditional reset of the poll state. Idempotent; runs once per day
    /// so no stale poll survives past its intended day even if the close
    /// check never fired.
    pub async fn daily_reset(&self) -> Result<(), TryhardError> {
        let mut state = self.state.lock().await;
        state.clear_poll();
        self.store.save(&state)?;
        info!("daily reset done, poll state cleared");
        Ok(())
    }
}
