use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::PlayerPreferences;

const MAX_FIELD_LEN: usize = 64;
const MAX_NOTES_LEN: usize = 500;
const MAX_TAGS: usize = 32;

/// Body of `POST /players`
///
/// Deserializes through [`PlayerPreferences`], so absent fields get the record
/// defaults and an empty `player_id` is rejected before validation runs.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlayerPayload {
    #[serde(flatten)]
    #[validate(custom(function = "validate_field_sizes"))]
    pub preferences: PlayerPreferences,
}

fn validate_field_sizes(preferences: &PlayerPreferences) -> Result<(), ValidationError> {
    let categorical = [
        &preferences.player_id,
        &preferences.platform,
        &preferences.game_mode,
        &preferences.level_range,
        &preferences.voice_chat,
        &preferences.timezone,
    ];
    if categorical.iter().any(|value| value.chars().count() > MAX_FIELD_LEN) {
        return Err(ValidationError::new("field_too_long"));
    }

    if preferences
        .notes
        .as_ref()
        .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LEN)
    {
        return Err(ValidationError::new("notes_too_long"));
    }

    if preferences.tags.len() > MAX_TAGS {
        return Err(ValidationError::new("too_many_tags"));
    }

    Ok(())
}

impl PlayerPayload {
    pub fn into_preferences(self) -> PlayerPreferences {
        self.preferences
    }
}

/// Query string of `GET /players/{player_id}/matches`
///
/// Absent values fall back to the configured matching defaults;
/// `limit=0` asks for every qualifying candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchQuery {
    pub min_score: Option<i64>,
    pub limit: Option<usize>,
}
