use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use thiserror::Error;

pub const DEFAULT_PLATFORM: &str = "unknown";
pub const DEFAULT_GAME_MODE: &str = "unknown";
pub const DEFAULT_LEVEL_RANGE: &str = "any";
pub const DEFAULT_VOICE_CHAT: &str = "optional";
pub const DEFAULT_TIMEZONE: &str = "any";

/// Errors raised while turning loose input into a [`PlayerPreferences`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Matchmaking preferences of a single player
///
/// Categorical fields are compared by exact equality when scoring. Fields that
/// are absent from the input are filled with sentinel defaults, so a record
/// never carries an undefined categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPreferences")]
pub struct PlayerPreferences {
    pub player_id: String,
    pub platform: String,
    pub game_mode: String,
    pub level_range: String,
    pub voice_chat: String,
    pub timezone: String,
    pub notes: Option<String>,
    pub tags: BTreeSet<String>,
}

/// Wire shape accepted on input, every field optional
#[derive(Debug, Default, Deserialize)]
struct RawPreferences {
    #[serde(default)]
    player_id: Option<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    game_mode: Option<String>,
    #[serde(default)]
    level_range: Option<String>,
    #[serde(default)]
    voice_chat: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl TryFrom<RawPreferences> for PlayerPreferences {
    type Error = RecordError;

    fn try_from(raw: RawPreferences) -> Result<Self, Self::Error> {
        let record = Self {
            player_id: raw.player_id.unwrap_or_default(),
            platform: raw.platform.unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            game_mode: raw.game_mode.unwrap_or_else(|| DEFAULT_GAME_MODE.to_string()),
            level_range: raw.level_range.unwrap_or_else(|| DEFAULT_LEVEL_RANGE.to_string()),
            voice_chat: raw.voice_chat.unwrap_or_else(|| DEFAULT_VOICE_CHAT.to_string()),
            timezone: raw.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            notes: raw.notes,
            tags: raw.tags.unwrap_or_default().into_iter().collect(),
        };
        record.ensure_valid()?;
        Ok(record)
    }
}

impl PlayerPreferences {
    /// Create a record with every optional field at its default
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            platform: DEFAULT_PLATFORM.to_string(),
            game_mode: DEFAULT_GAME_MODE.to_string(),
            level_range: DEFAULT_LEVEL_RANGE.to_string(),
            voice_chat: DEFAULT_VOICE_CHAT.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            notes: None,
            tags: BTreeSet::new(),
        }
    }

    /// Reject records that must never be stored, such as an empty `player_id`
    pub fn ensure_valid(&self) -> Result<(), RecordError> {
        if self.player_id.is_empty() {
            return Err(RecordError::MissingField("player_id"));
        }
        Ok(())
    }

    /// Build a record from a string-keyed mapping, applying defaults
    ///
    /// A missing, null or empty `player_id` is rejected with
    /// [`RecordError::MissingField`].
    pub fn from_map(map: Map<String, Value>) -> Result<Self, RecordError> {
        let raw: RawPreferences = serde_json::from_value(Value::Object(map))
            .map_err(|e| RecordError::Malformed(e.to_string()))?;
        raw.try_into()
    }

    /// Render the record as a string-keyed mapping, tags sorted
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("player_id".into(), Value::String(self.player_id.clone()));
        map.insert("platform".into(), Value::String(self.platform.clone()));
        map.insert("game_mode".into(), Value::String(self.game_mode.clone()));
        map.insert("level_range".into(), Value::String(self.level_range.clone()));
        map.insert("voice_chat".into(), Value::String(self.voice_chat.clone()));
        map.insert("timezone".into(), Value::String(self.timezone.clone()));
        map.insert(
            "notes".into(),
            self.notes.clone().map_or(Value::Null, Value::String),
        );
        map.insert(
            "tags".into(),
            Value::Array(self.tags.iter().cloned().map(Value::String).collect()),
        );
        map
    }
}

/// Per-attribute weights for the compatibility score
///
/// `tags` is applied once per shared tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub platform: i64,
    pub game_mode: i64,
    pub level_range: i64,
    pub voice_chat: i64,
    pub timezone: i64,
    pub tags: i64,
}

impl ScoringWeights {
    /// Score a record earns against itself
    pub fn max_score_for(&self, record: &PlayerPreferences) -> i64 {
        self.platform
            + self.game_mode
            + self.level_range
            + self.voice_chat
            + self.timezone
            + self.tags * record.tags.len() as i64
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            platform: 3,
            game_mode: 3,
            level_range: 2,
            voice_chat: 1,
            timezone: 1,
            tags: 1,
        }
    }
}

/// A candidate paired with its compatibility score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub player: PlayerPreferences,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_from_map_applies_defaults() {
        let record = PlayerPreferences::from_map(as_map(json!({ "player_id": "tav" }))).unwrap();

        assert_eq!(record.player_id, "tav");
        assert_eq!(record.platform, "unknown");
        assert_eq!(record.game_mode, "unknown");
        assert_eq!(record.level_range, "any");
        assert_eq!(record.voice_chat, "optional");
        assert_eq!(record.timezone, "any");
        assert_eq!(record.notes, None);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_from_map_missing_player_id() {
        let err = PlayerPreferences::from_map(as_map(json!({ "platform": "PC" }))).unwrap_err();
        assert_eq!(err, RecordError::MissingField("player_id"));

        let err = PlayerPreferences::from_map(as_map(json!({ "player_id": "" }))).unwrap_err();
        assert_eq!(err, RecordError::MissingField("player_id"));

        let err = PlayerPreferences::from_map(as_map(json!({ "player_id": null }))).unwrap_err();
        assert_eq!(err, RecordError::MissingField("player_id"));
    }

    #[test]
    fn test_ensure_valid_rejects_empty_id() {
        assert!(PlayerPreferences::new("tav").ensure_valid().is_ok());
        assert_eq!(
            PlayerPreferences::new("").ensure_valid(),
            Err(RecordError::MissingField("player_id"))
        );
    }

    #[test]
    fn test_from_map_wrong_type_is_malformed() {
        let err = PlayerPreferences::from_map(as_map(json!({ "player_id": "tav", "tags": "solo" })))
            .unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let record = PlayerPreferences::from_map(as_map(json!({
            "player_id": "tav",
            "platform": null,
            "tags": null,
            "notes": null,
        })))
        .unwrap();

        assert_eq!(record.platform, "unknown");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let record = PlayerPreferences::from_map(as_map(json!({
            "player_id": "tav",
            "tags": ["roleplay", "modded", "roleplay"],
        })))
        .unwrap();

        assert_eq!(record.tags.len(), 2);
    }

    #[test]
    fn test_to_map_sorts_tags() {
        let mut record = PlayerPreferences::new("karlach");
        record.tags.insert("roleplay".to_string());
        record.tags.insert("honour".to_string());
        record.tags.insert("modded".to_string());

        let map = record.to_map();

        assert_eq!(map["tags"], json!(["honour", "modded", "roleplay"]));
        assert_eq!(map["notes"], Value::Null);
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn test_map_round_trip() {
        let mut record = PlayerPreferences::new("astarion");
        record.platform = "PS5".to_string();
        record.notes = Some("evenings only".to_string());
        record.tags.insert("new player".to_string());

        let restored = PlayerPreferences::from_map(record.to_map()).unwrap();

        assert_eq!(restored, record);
    }

    #[test]
    fn test_serde_uses_same_rules() {
        let record: PlayerPreferences =
            serde_json::from_str(r#"{"player_id":"gale","tags":["b","a"]}"#).unwrap();
        assert_eq!(record.voice_chat, "optional");

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""tags":["a","b"]"#));

        let missing = serde_json::from_str::<PlayerPreferences>(r#"{"platform":"PC"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_max_score_for() {
        let mut record = PlayerPreferences::new("wyll");
        record.tags.insert("roleplay".to_string());
        record.tags.insert("modded".to_string());

        assert_eq!(ScoringWeights::default().max_score_for(&record), 12);
    }
}
