//! Test utilities and shared test helpers for the tryhard poll bot.
//!
//! This module provides common testing utilities, fixtures, and helper
//! functions used across the workspace crates for unit and integration
//! testing.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    let _ = &INIT;
}

/// The timezone every scheduling test runs in.
pub const TEST_TIMEZONE: Tz = chrono_tz::Europe::Paris;

/// Test fixture for a zoned timestamp in the bot's timezone.
pub fn mock_local_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Tz> {
    TEST_TIMEZONE
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Test fixture for a plain time of day.
pub fn mock_time(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Test fixture for a calendar date.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Discord-related test fixtures.
pub mod discord_fixtures {
    use crate::{ChannelId, GuildId, MessageId};

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(111111111111111111)
    }

    /// Create a test channel ID.
    pub fn test_channel_id() -> ChannelId {
        ChannelId(123456789012345678)
    }

    /// Create a test message ID.
    pub fn test_message_id() -> MessageId {
        MessageId(987654321098765432)
    }
}

/// Property-based testing strategies using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use chrono::NaiveTime;
    use proptest::prelude::*;

    /// Strategy for generating an arbitrary time of day at minute
    /// granularity, the resolution poll session times use.
    pub fn time_of_day_strategy() -> impl Strategy<Value = NaiveTime> {
        (0u32..24, 0u32..60)
            .prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).expect("valid time of day"))
    }

    /// Strategy for generating a poll-close lead interval in seconds.
    pub fn lead_seconds_strategy() -> impl Strategy<Value = u32> {
        1u32..=6 * 3600
    }
}
