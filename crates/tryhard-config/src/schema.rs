//! Configuration schema definitions using serde with validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tryhard_common::{ChannelId, GuildId, TryhardError};

/// Main configuration structure for the tryhard poll bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Poll timing configuration.
    pub poll: PollTimingConfig,
    /// Persisted state configuration.
    pub storage: StorageConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Guild the slash commands are registered in.
    pub guild_id: GuildId,
    /// Channel the poll is posted to.
    pub channel_id: ChannelId,
    /// Name of the role mentioned by the poll announcement.
    pub role_name: String,
}

/// Poll timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollTimingConfig {
    /// Seconds before the session time at which the poll closes.
    pub close_delay_seconds: u32,
    /// Debug mode: close the poll 10 seconds after creation instead.
    pub debug_close: bool,
}

/// Persisted state configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON state file.
    pub state_path: PathBuf,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TryhardError> {
        if self.discord.token.is_empty() {
            return Err(TryhardError::config("Discord token cannot be empty"));
        }

        if self.discord.guild_id.0 == 0 {
            return Err(TryhardError::config("Guild id cannot be zero"));
        }

        if self.discord.channel_id.0 == 0 {
            return Err(TryhardError::config("Channel id cannot be zero"));
        }

        if self.discord.role_name.is_empty() {
            return Err(TryhardError::config("Role name cannot be empty"));
        }

        if self.poll.close_delay_seconds == 0 {
            return Err(TryhardError::config(
                "Poll close delay must be at least one second",
            ));
        }

        Ok(())
    }
}
