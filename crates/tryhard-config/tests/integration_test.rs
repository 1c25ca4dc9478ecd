//! Integration tests for tryhard-config crate.

use tryhard_config::{Config, ConfigLoader, PollStore};

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Default config should fail validation due to empty token and ids
    assert!(config.validate().is_err());

    // Set required fields
    config.discord.token = "test_token".to_string();
    config.discord.guild_id.0 = 111111111111111111;
    config.discord.channel_id.0 = 123456789012345678;
    config.discord.role_name = "tryhard".to_string();

    // Now it should pass
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_close_delay_is_rejected() {
    let mut config = Config::default();
    config.discord.token = "test_token".to_string();
    config.discord.guild_id.0 = 1;
    config.discord.channel_id.0 = 2;
    config.discord.role_name = "tryhard".to_string();
    config.poll.close_delay_seconds = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_loader_and_store_work_together() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    let state_path_str = state_path.to_str().unwrap().to_string();

    let config = ConfigLoader::from_lookup(|key| match key {
        "DISCORD_TOKEN" => Some("test_token".to_string()),
        "GUILD_ID" => Some("111111111111111111".to_string()),
        "CHANNEL_ID" => Some("123456789012345678".to_string()),
        "ROLE_NAME" => Some("tryhard".to_string()),
        "STATE_FILE" => Some(state_path_str.clone()),
        _ => None,
    })
    .unwrap();
    assert!(config.validate().is_ok());

    let store = PollStore::new(&config.storage.state_path);
    let state = store.load().unwrap();
    assert!(!state.poll_active);
    assert!(state_path.exists());
}
