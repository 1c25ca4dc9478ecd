//! Integration tests for tryhard-commands crate.
//!
//! These tests verify the command metadata Poise derives from the macro
//! annotations: the renamed command names the guild registers, the guild
//! scoping, and the optional time parameter.

use tryhard_commands::ask_for_tryhard_today::ask_for_tryhard_today;
use tryhard_commands::tryhard_info::tryhard_info;

#[test]
fn test_start_command_metadata() {
    let command = ask_for_tryhard_today();

    assert_eq!(command.name, "askfortryhardtoday");
    assert!(command.guild_only);
    assert_eq!(command.parameters.len(), 1);

    let param = &command.parameters[0];
    assert_eq!(param.name, "heure");
    assert!(!param.required);
}

#[test]
fn test_info_command_metadata() {
    let command = tryhard_info();

    assert_eq!(command.name, "tryhardinfo");
    assert!(command.guild_only);
    assert!(command.parameters.is_empty());
}
