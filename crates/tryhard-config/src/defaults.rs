//! Default values for the configuration schema.

use crate::schema::{Config, DiscordConfig, PollTimingConfig, StorageConfig};
use std::path::PathBuf;
use tryhard_common::{ChannelId, GuildId};

/// Default lead interval before the session at which the poll closes.
pub const DEFAULT_CLOSE_DELAY_SECONDS: u32 = 3600;

/// Default path of the persisted state file.
pub const DEFAULT_STATE_PATH: &str = "config.json";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            poll: PollTimingConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: GuildId(0),
            channel_id: ChannelId(0),
            role_name: String::new(),
        }
    }
}

impl Default for PollTimingConfig {
    fn default() -> Self {
        Self {
            close_delay_seconds: DEFAULT_CLOSE_DELAY_SECONDS,
            debug_close: false,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}
