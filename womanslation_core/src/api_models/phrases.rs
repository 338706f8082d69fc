use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{MeaningCreationRequest, MeaningWithVotes};
use crate::{
    id::PhraseId,
    validation::{normalize_tags, parse_tag_filter, validate_phrase_text, ValidationError},
};


pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const MAXIMUM_PAGE_SIZE: u32 = 100;



#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
#[schema(
    example = json!({
        "id": "0190b6f2-1a2b-7c3d-8e4f-0123456789aa",
        "text": "We need to talk.",
        "suggested_response": "Sure, what's on your mind?",
        "tags": ["comedic", "ominous"],
        "views": 12,
        "create_date": "2024-07-14T20:34:27.217273Z",
        "meanings": []
    })
)]
pub struct Phrase {
    pub id: PhraseId,

    /// The ambiguous statement itself. Unique across all phrases.
    pub text: String,

    pub suggested_response: Option<String>,

    /// Lower-case, trimmed tags.
    pub tags: Vec<String>,

    /// How many times the phrase has been viewed.
    pub views: i64,

    pub create_date: DateTime<Utc>,

    /// Meanings in the order they were added.
    pub meanings: Vec<MeaningWithVotes>,
}



#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[schema(
    example = json!({
        "text": "We need to talk.",
        "suggested_response": "Sure, what's on your mind?",
        "tags": ["Comedic ", " Ominous"],
        "meanings": [
            {
                "meaning": "Something festered.",
                "tone": "Angry / Confrontational",
                "confidence": 98,
                "warning_level": 5
            }
        ]
    })
)]
pub struct PhraseCreationRequest {
    pub text: String,

    #[serde(default)]
    pub suggested_response: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Meanings to create together with the phrase.
    #[serde(default)]
    pub meanings: Vec<MeaningCreationRequest>,
}

impl PhraseCreationRequest {
    /// Validates the phrase and every meaning it carries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_phrase_text(&self.text)?;

        for meaning in &self.meanings {
            meaning.validate()?;
        }

        Ok(())
    }

    pub fn normalized_tags(&self) -> Vec<String> {
        normalize_tags(&self.tags)
    }
}


#[derive(Deserialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
pub struct PhraseUpdateRequest {
    pub text: String,

    #[serde(default)]
    pub suggested_response: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl PhraseUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_phrase_text(&self.text)
    }

    pub fn normalized_tags(&self) -> Vec<String> {
        normalize_tags(&self.tags)
    }
}



/// Order in which phrase listings are returned.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default, ToSchema)]
pub enum PhraseSortOrder {
    /// By text, ascending.
    #[serde(rename = "A_Z")]
    AToZ,

    /// By text, descending.
    #[serde(rename = "Z_A")]
    ZToA,

    #[serde(rename = "oldest")]
    Oldest,

    #[default]
    #[serde(rename = "newest")]
    Newest,

    #[serde(rename = "most_viewed")]
    MostViewed,
}

impl PhraseSortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AToZ => "A_Z",
            Self::ZToA => "Z_A",
            Self::Oldest => "oldest",
            Self::Newest => "newest",
            Self::MostViewed => "most_viewed",
        }
    }
}

impl Display for PhraseSortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Deserialize, Clone, PartialEq, Eq, Debug, IntoParams)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[into_params(parameter_in = Query)]
pub struct PhrasesListRequest {
    /// Zero-based page index.
    #[serde(default)]
    pub page_number: u32,

    /// Clamped to between 1 and 100.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default, alias = "pageOrder")]
    pub page_order: PhraseSortOrder,

    /// Case-insensitive substring to look for in the phrase text.
    #[serde(default)]
    pub search_text: Option<String>,

    /// Comma-separated tags; a phrase matches if it has any of them.
    #[serde(default)]
    pub tags: Option<String>,
}

impl Default for PhrasesListRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            page_order: PhraseSortOrder::default(),
            search_text: None,
            tags: None,
        }
    }
}

impl PhrasesListRequest {
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAXIMUM_PAGE_SIZE)
    }

    /// The search text, if it contains anything but whitespace.
    pub fn effective_search_text(&self) -> Option<&str> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn tag_filter(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(parse_tag_filter)
            .unwrap_or_default()
    }
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct PhraseDeletionResponse {
    pub deleted_votes: u64,
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sort_order_parses_from_query_labels() {
        for order in [
            PhraseSortOrder::AToZ,
            PhraseSortOrder::ZToA,
            PhraseSortOrder::Oldest,
            PhraseSortOrder::Newest,
            PhraseSortOrder::MostViewed,
        ] {
            let json = format!("\"{}\"", order);
            assert_eq!(serde_json::from_str::<PhraseSortOrder>(&json).unwrap(), order);
        }

        assert!(serde_json::from_str::<PhraseSortOrder>("\"alphabetical\"").is_err());
    }

    #[test]
    fn list_request_defaults() {
        let request: PhrasesListRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request, PhrasesListRequest::default());
        assert_eq!(request.page_order, PhraseSortOrder::Newest);
        assert_eq!(request.effective_page_size(), 10);
        assert!(request.tag_filter().is_empty());
    }

    #[test]
    fn list_request_accepts_legacy_order_parameter_name() {
        let request: PhrasesListRequest =
            serde_json::from_str(r#"{ "pageOrder": "most_viewed" }"#).unwrap();

        assert_eq!(request.page_order, PhraseSortOrder::MostViewed);
    }

    #[test]
    fn page_size_is_clamped() {
        let mut request = PhrasesListRequest {
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(request.effective_page_size(), 1);

        request.page_size = 5000;
        assert_eq!(request.effective_page_size(), MAXIMUM_PAGE_SIZE);
    }

    #[test]
    fn blank_search_text_is_ignored() {
        let request = PhrasesListRequest {
            search_text: Some("   ".to_string()),
            tags: Some(" Love,testing ".to_string()),
            ..Default::default()
        };

        assert_eq!(request.effective_search_text(), None);
        assert_eq!(
            request.tag_filter(),
            vec!["love".to_string(), "testing".to_string()]
        );
    }

    #[test]
    fn creation_request_normalizes_tags_and_validates_meanings() {
        let request: PhraseCreationRequest = serde_json::from_str(
            r#"{
                "text": "We need to talk.",
                "tags": ["Comedic ", " Ominous"],
                "meanings": [{ "meaning": "no", "tone": "Testing" }]
            }"#,
        )
        .unwrap();

        assert_eq!(
            request.normalized_tags(),
            vec!["comedic".to_string(), "ominous".to_string()]
        );
        assert_eq!(request.validate(), Err(ValidationError::MeaningTooShort));
    }
}
