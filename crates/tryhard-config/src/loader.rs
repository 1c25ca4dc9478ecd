//! Configuration loading from the process environment.

use crate::schema::{Config, DiscordConfig, PollTimingConfig, StorageConfig};
use std::path::PathBuf;
use tryhard_common::{ChannelId, GuildId, TryhardError};

/// Environment variable holding the bot token.
pub const ENV_TOKEN: &str = "DISCORD_TOKEN";
/// Environment variable holding the guild id.
pub const ENV_GUILD_ID: &str = "GUILD_ID";
/// Environment variable holding the poll channel id.
pub const ENV_CHANNEL_ID: &str = "CHANNEL_ID";
/// Environment variable holding the mentioned role name.
pub const ENV_ROLE_NAME: &str = "ROLE_NAME";
/// Environment variable overriding the poll close lead interval.
pub const ENV_CLOSE_DELAY: &str = "POLL_CLOSE_DELAY_SECONDS";
/// Environment variable enabling the short debug close interval.
pub const ENV_DEBUG_POLL: &str = "DEBUG_POLL";
/// Environment variable overriding the state file path.
pub const ENV_STATE_FILE: &str = "STATE_FILE";

/// Configuration loader reading from the process environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Config, TryhardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// The lookup seam exists so tests can feed variables without mutating
    /// process-global environment state.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, TryhardError> {
        let defaults = Config::default();

        let discord = DiscordConfig {
            token: required(&lookup, ENV_TOKEN)?,
            guild_id: GuildId(parse_u64(&lookup, ENV_GUILD_ID)?),
            channel_id: ChannelId(parse_u64(&lookup, ENV_CHANNEL_ID)?),
            role_name: required(&lookup, ENV_ROLE_NAME)?,
        };

        let poll = PollTimingConfig {
            close_delay_seconds: match lookup(ENV_CLOSE_DELAY) {
                Some(raw) => raw.parse().map_err(|_| {
                    TryhardError::config(format!("{ENV_CLOSE_DELAY} must be an integer, got '{raw}'"))
                })?,
                None => defaults.poll.close_delay_seconds,
            },
            debug_close: lookup(ENV_DEBUG_POLL)
                .map(|raw| raw.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        };

        let storage = StorageConfig {
            state_path: lookup(ENV_STATE_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.storage.state_path),
        };

        Ok(Config {
            discord,
            poll,
            storage,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, TryhardError> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| TryhardError::config(format!("missing required environment variable {key}")))
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<u64, TryhardError> {
    let raw = required(lookup, key)?;
    raw.parse()
        .map_err(|_| TryhardError::config(format!("{key} must be an integer id, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_TOKEN, "test_token"),
            (ENV_GUILD_ID, "111111111111111111"),
            (ENV_CHANNEL_ID, "123456789012345678"),
            (ENV_ROLE_NAME, "tryhard"),
        ])
    }

    fn lookup_in(
        vars: HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> {
        move |key| vars.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn test_loads_minimal_environment() {
        let config = ConfigLoader::from_lookup(lookup_in(base_vars())).unwrap();

        assert_eq!(config.discord.token, "test_token");
        assert_eq!(config.discord.guild_id.0, 111111111111111111);
        assert_eq!(config.discord.channel_id.0, 123456789012345678);
        assert_eq!(config.discord.role_name, "tryhard");
        assert_eq!(config.poll.close_delay_seconds, 3600);
        assert!(!config.poll.debug_close);
        assert_eq!(config.storage.state_path.to_str(), Some("config.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_overrides() {
        let mut vars = base_vars();
        vars.insert(ENV_CLOSE_DELAY, "1800");
        vars.insert(ENV_DEBUG_POLL, "TRUE");
        vars.insert(ENV_STATE_FILE, "/var/lib/tryhard/state.json");

        let config = ConfigLoader::from_lookup(lookup_in(vars)).unwrap();

        assert_eq!(config.poll.close_delay_seconds, 1800);
        assert!(config.poll.debug_close);
        assert_eq!(
            config.storage.state_path.to_str(),
            Some("/var/lib/tryhard/state.json")
        );
    }

    #[test]
    fn test_missing_required_variable() {
        let mut vars = base_vars();
        vars.remove(ENV_TOKEN);

        let err = ConfigLoader::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(err.to_string().contains(ENV_TOKEN));
    }

    #[test]
    fn test_non_numeric_ids_are_rejected() {
        let mut vars = base_vars();
        vars.insert(ENV_GUILD_ID, "not-a-number");

        let err = ConfigLoader::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(err.to_string().contains(ENV_GUILD_ID));
    }

    #[test]
    fn test_non_numeric_delay_is_rejected() {
        let mut vars = base_vars();
        vars.insert(ENV_CLOSE_DELAY, "soon");

        let err = ConfigLoader::from_lookup(lookup_in(vars)).unwrap_err();
        assert!(err.to_string().contains(ENV_CLOSE_DELAY));
    }

    #[test]
    fn test_debug_flag_parsing() {
        for (raw, expected) in [("true", true), ("True", true), ("false", false), ("1", false)] {
            let mut vars = base_vars();
            vars.insert(ENV_DEBUG_POLL, raw);
            let config = ConfigLoader::from_lookup(lookup_in(vars)).unwrap();
            assert_eq!(config.poll.debug_close, expected, "raw value {raw:?}");
        }
    }
}
