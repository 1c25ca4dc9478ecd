//! Close time computation and the periodic close window check.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Timezone all scheduling decisions are made in.
pub const TIMEZONE: Tz = chrono_tz::Europe::Paris;

/// Half-width of the window around the close time in which the periodic
/// check fires.
pub const CLOSE_TOLERANCE_SECONDS: i64 = 5;

/// Lead interval used instead of the configured one when debug mode is on.
pub const DEBUG_CLOSE_DELAY_SECONDS: i64 = 10;

/// Computes the close time for a session: the lead interval before the
/// session time of day. Wraps around midnight like plain time-of-day
/// arithmetic; a close that wraps lands in the past and is rejected by
/// [`start_is_in_the_future`].
pub fn close_time_for(session_time: NaiveTime, close_delay_seconds: u32) -> NaiveTime {
    session_time - Duration::seconds(i64::from(close_delay_seconds))
}

/// Close time in debug mode: a fixed short interval after `now`.
pub fn debug_close_time(now: DateTime<Tz>) -> NaiveTime {
    (now + Duration::seconds(DEBUG_CLOSE_DELAY_SECONDS)).time()
}

/// Anchors a time of day on `now`'s calendar date in the bot timezone.
/// Returns `None` for the wall-clock times skipped by a DST transition.
pub fn anchor_on_date(now: DateTime<Tz>, time: NaiveTime) -> Option<DateTime<Tz>> {
    TIMEZONE
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()
}

/// True when `now` falls within the close tolerance window of `close_time`
/// anchored on today's date.
pub fn within_close_window(now: DateTime<Tz>, close_time: NaiveTime) -> bool {
    match anchor_on_date(now, close_time) {
        Some(close_dt) => (now - close_dt).num_seconds().abs() <= CLOSE_TOLERANCE_SECONDS,
        None => false,
    }
}

/// Checks the start precondition: both the session and its computed close
/// must still be ahead of `now` on today's date.
pub fn start_is_in_the_future(
    now: DateTime<Tz>,
    session_time: NaiveTime,
    close_delay_seconds: u32,
) -> bool {
    match anchor_on_date(now, session_time) {
        Some(session_dt) => {
            let close_dt = session_dt - Duration::seconds(i64::from(close_delay_seconds));
            session_dt >= now && close_dt >= now
        }
        None => false,
    }
}

/// Earliest session time that can still be polled right now, for the
/// rejection message.
pub fn earliest_session_time(now: DateTime<Tz>, close_delay_seconds: u32) -> NaiveTime {
    (now + Duration::seconds(i64::from(close_delay_seconds))).time()
}
