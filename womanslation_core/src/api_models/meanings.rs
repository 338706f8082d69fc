use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    id::{MeaningId, PhraseId},
    tone::Tone,
    validation::{
        validate_meaning_fields,
        ValidationError,
        DEFAULT_CONFIDENCE,
        DEFAULT_WARNING_LEVEL,
    },
};


const fn default_confidence() -> i32 {
    DEFAULT_CONFIDENCE
}

const fn default_warning_level() -> i32 {
    DEFAULT_WARNING_LEVEL
}


/// A single interpretation of a phrase, together with the vote
/// aggregates computed for the voter that made the request.
#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
#[schema(
    example = json!({
        "id": "0190b6f2-1a2b-7c3d-8e4f-0123456789ab",
        "phrase_id": "0190b6f2-1a2b-7c3d-8e4f-0123456789aa",
        "meaning": "Something festered.",
        "tone": "Angry / Confrontational",
        "confidence": 98,
        "warning_level": 5,
        "create_date": "2024-07-14T20:34:27.217273Z",
        "like_count": 1,
        "is_liked_by_user": true
    })
)]
pub struct MeaningWithVotes {
    pub id: MeaningId,

    /// The phrase this meaning belongs to.
    pub phrase_id: PhraseId,

    pub meaning: String,

    pub tone: Tone,

    /// How confident the author is in this interpretation, from 0 to 100.
    pub confidence: i32,

    /// How alarming this interpretation is, from 0 to 5.
    pub warning_level: i32,

    pub create_date: DateTime<Utc>,

    /// Number of votes with `like = true` on this meaning.
    pub like_count: i64,

    /// Whether the requesting voter has liked this meaning.
    pub is_liked_by_user: bool,
}


#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "meaning": "Something festered.",
        "tone": "Angry / Confrontational",
        "confidence": 98,
        "warning_level": 5
    })
)]
pub struct MeaningCreationRequest {
    pub meaning: String,

    #[serde(default)]
    pub tone: Tone,

    #[serde(default = "default_confidence")]
    pub confidence: i32,

    #[serde(default = "default_warning_level")]
    pub warning_level: i32,
}

impl MeaningCreationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_meaning_fields(&self.meaning, self.confidence, self.warning_level)
    }
}


/// Replaces every mutable field of a meaning; omitted fields fall back
/// to their defaults, exactly as on creation.
#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
pub struct MeaningUpdateRequest {
    pub meaning: String,

    #[serde(default)]
    pub tone: Tone,

    #[serde(default = "default_confidence")]
    pub confidence: i32,

    #[serde(default = "default_warning_level")]
    pub warning_level: i32,
}

impl MeaningUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_meaning_fields(&self.meaning, self.confidence, self.warning_level)
    }
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct MeaningsDeletionResponse {
    pub deleted_meanings: u64,
    pub deleted_votes: u64,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct MeaningDeletionResponse {
    pub deleted_votes: u64,
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn creation_request_fills_in_defaults() {
        let request: MeaningCreationRequest =
            serde_json::from_str(r#"{ "meaning": "She is fine." }"#).unwrap();

        assert_eq!(request.tone, Tone::Other);
        assert_eq!(request.confidence, 50);
        assert_eq!(request.warning_level, 0);
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn creation_request_rejects_unknown_tones() {
        let result = serde_json::from_str::<MeaningCreationRequest>(
            r#"{ "meaning": "She is fine.", "tone": "Grumpy" }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn update_request_validates_ranges() {
        let request: MeaningUpdateRequest = serde_json::from_str(
            r#"{ "meaning": "She is fine.", "tone": "Testing", "warning_level": 7 }"#,
        )
        .unwrap();

        assert_eq!(
            request.validate(),
            Err(ValidationError::WarningLevelOutOfRange { warning_level: 7 })
        );
    }
}
