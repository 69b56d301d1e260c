//! Score records and the leaderboard built from them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;
use crate::types::GameMode;

/// Key prefix shared by every saved record.
pub const SCORE_KEY_PREFIX: &str = "score:";

/// Final result of one session as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    #[serde(with = "mode_name")]
    pub mode: GameMode,
    /// Local calendar date, `dd.mm.yyyy`.
    pub date: String,
}

impl ScoreRecord {
    /// A record stamped with today's local date.
    pub fn new(score: u32, lines: u32, level: u32, mode: GameMode) -> Self {
        Self {
            score,
            lines,
            level,
            mode,
            date: chrono::Local::now().format("%d.%m.%Y").to_string(),
        }
    }
}

/// Storage key for a record saved at `timestamp_ms`.
pub fn score_key(timestamp_ms: u64) -> String {
    format!("{SCORE_KEY_PREFIX}{timestamp_ms}")
}

pub async fn save_score<S: KeyValueStore>(
    store: &S,
    record: &ScoreRecord,
    timestamp_ms: u64,
) -> Result<()> {
    let value = serde_json::to_string(record).context("failed to encode score record")?;
    store.set(&score_key(timestamp_ms), value).await
}

/// Top `limit` records by score, highest first.
///
/// Equal scores keep key order (older first). Entries that fail to parse are
/// skipped with a warning.
pub async fn load_leaderboard<S: KeyValueStore>(
    store: &S,
    limit: usize,
) -> Result<Vec<ScoreRecord>> {
    let keys = store.list(SCORE_KEY_PREFIX).await?;
    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(raw) = store.get(&key).await? else {
            continue;
        };
        match serde_json::from_str::<ScoreRecord>(&raw) {
            Ok(record) => records.push(record),
            Err(err) => log::warn!("skipping malformed score record {key}: {err}"),
        }
    }
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(limit);
    Ok(records)
}

mod mode_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::GameMode;

    pub fn serialize<S: Serializer>(mode: &GameMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GameMode, D::Error> {
        let raw = String::deserialize(deserializer)?;
        GameMode::from_str(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown game mode `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_json_shape() {
        let record = ScoreRecord {
            score: 2400,
            lines: 12,
            level: 2,
            mode: GameMode::Marathon,
            date: "16.10.2026".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["score"], 2400);
        assert_eq!(json["lines"], 12);
        assert_eq!(json["level"], 2);
        assert_eq!(json["mode"], "marathon");
        assert_eq!(json["date"], "16.10.2026");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let raw = r#"{"score":1,"lines":0,"level":1,"mode":"zen","date":"x"}"#;
        assert!(serde_json::from_str::<ScoreRecord>(raw).is_err());
    }

    #[test]
    fn new_record_has_dotted_date() {
        let record = ScoreRecord::new(10, 1, 1, GameMode::Classic);
        let parts: Vec<&str> = record.date.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn keys_share_prefix() {
        assert_eq!(score_key(1700000000123), "score:1700000000123");
    }
}
