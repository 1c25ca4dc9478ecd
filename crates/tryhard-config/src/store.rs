//! Persisted poll state with atomic file operations.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tryhard_common::TryhardError;

/// Wire format of the planned session time.
const SESSION_TIME_FORMAT: &str = "%H:%M";
/// Wire format of the computed close time.
const CLOSE_TIME_FORMAT: &str = "%H:%M:%S";

fn default_session_time() -> NaiveTime {
    NaiveTime::from_hms_opt(21, 0, 0).expect("21:00 is a valid time of day")
}

/// Persisted state of the poll lifecycle.
///
/// Serialized as a flat JSON document. Every field except `session_time`
/// defaults to its inactive value, so documents written by older versions
/// load with the missing keys backfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollState {
    /// Planned session time of day.
    #[serde(default = "default_session_time", with = "hhmm")]
    pub session_time: NaiveTime,
    /// Whether a poll is currently open.
    #[serde(default)]
    pub poll_active: bool,
    /// Id of the posted poll message, if any.
    #[serde(default)]
    pub poll_message_id: Option<u64>,
    /// Calendar date the poll was posted, if any.
    #[serde(default)]
    pub last_posted_date: Option<NaiveDate>,
    /// Time of day the poll must close, computed at creation.
    #[serde(default, with = "opt_hhmmss")]
    pub close_time: Option<NaiveTime>,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            session_time: default_session_time(),
            poll_active: false,
            poll_message_id: None,
            last_posted_date: None,
            close_time: None,
        }
    }
}

impl PollState {
    /// True when the state describes a live poll with a posted message.
    pub fn has_active_poll(&self) -> bool {
        self.poll_active && self.poll_message_id.is_some()
    }

    /// Resets every poll field to its inactive value, keeping the session
    /// time. Safe to call on an already-cleared state.
    pub fn clear_poll(&mut self) {
        self.poll_active = false;
        self.poll_message_id = None;
        self.last_posted_date = None;
        self.close_time = None;
    }
}

/// File-backed store for [`PollState`] with atomic writes.
pub struct PollStore {
    path: PathBuf,
}

impl PollStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted state, creating and persisting defaults when the
    /// file does not exist yet. A file that exists but cannot be parsed is
    /// an error; the caller treats that as fatal at startup.
    pub fn load(&self) -> Result<PollState, TryhardError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no state file found, writing defaults");
            let state = PollState::default();
            self.save(&state)?;
            return Ok(state);
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let state: PollState = serde_json::from_str(&raw).map_err(|e| {
            TryhardError::state(format!("cannot parse {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), active = state.poll_active, "state loaded");
        Ok(state)
    }

    /// Writes the full state to disk atomically: the document is serialized
    /// into a temporary file in the target directory, then renamed over the
    /// destination so readers never observe a partial write.
    pub fn save(&self, state: &PollState) -> Result<(), TryhardError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        let json = serde_json::to_string(state)?;
        file.write_all(json.as_bytes())?;
        file.persist(&self.path).map_err(|e| TryhardError::Io(e.error))?;
        Ok(())
    }
}

mod hhmm {
    use super::SESSION_TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(SESSION_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, SESSION_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod opt_hhmmss {
    use super::CLOSE_TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&t.format(CLOSE_TIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            NaiveTime::parse_from_str(&s, CLOSE_TIME_FORMAT).map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryhard_common::test_utils::{create_temp_dir, mock_date, mock_time};

    fn store_in(dir: &tempfile::TempDir) -> PollStore {
        PollStore::new(dir.path().join("state.json"))
    }

    fn active_state() -> PollState {
        PollState {
            session_time: mock_time(23, 0),
            poll_active: true,
            poll_message_id: Some(987654321098765432),
            last_posted_date: Some(mock_date(2024, 6, 1)),
            close_time: Some(NaiveTime::from_hms_opt(22, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_load_creates_defaults_when_missing() {
        let dir = create_temp_dir();
        let store = store_in(&dir);

        let state = store.load().unwrap();
        assert_eq!(state, PollState::default());
        assert_eq!(state.session_time, mock_time(21, 0));
        assert!(!state.poll_active);

        // The defaults must have been persisted too.
        assert!(store.path().exists());
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, state);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = create_temp_dir();
        let store = store_in(&dir);

        let state = active_state();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&active_state()).unwrap();

        assert!(json.contains(r#""session_time":"23:00""#), "json: {json}");
        assert!(json.contains(r#""close_time":"22:00:00""#), "json: {json}");
        assert!(json.contains(r#""last_posted_date":"2024-06-01""#), "json: {json}");
        assert!(json.contains(r#""poll_active":true"#), "json: {json}");
        assert!(json.contains(r#""poll_message_id":987654321098765432"#), "json: {json}");
    }

    #[test]
    fn test_missing_keys_are_backfilled() {
        // Document written before the poll_active and close_time fields
        // existed.
        let legacy = r#"{"session_time":"21:00","poll_message_id":null,"last_posted_date":null}"#;
        let state: PollState = serde_json::from_str(legacy).unwrap();

        assert!(!state.poll_active);
        assert_eq!(state.close_time, None);
        assert_eq!(state.session_time, mock_time(21, 0));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("State file error"));
    }

    #[test]
    fn test_invalid_time_string_is_an_error() {
        let raw = r#"{"session_time":"25:99","poll_active":false}"#;
        assert!(serde_json::from_str::<PollState>(raw).is_err());
    }

    #[test]
    fn test_save_overwrites_completely() {
        let dir = create_temp_dir();
        let store = store_in(&dir);

        store.save(&active_state()).unwrap();

        let mut cleared = active_state();
        cleared.clear_poll();
        store.save(&cleared).unwrap();

        let reloaded = store.load().unwrap();
        assert!(!reloaded.poll_active);
        assert_eq!(reloaded.poll_message_id, None);
        assert_eq!(reloaded.last_posted_date, None);
        assert_eq!(reloaded.close_time, None);
        // Session time survives a clear.
        assert_eq!(reloaded.session_time, mock_time(23, 0));
    }

    #[test]
    fn test_clear_poll_is_idempotent() {
        let mut state = active_state();
        state.clear_poll();
        let once = state.clone();
        state.clear_poll();
        assert_eq!(state, once);
    }
}
