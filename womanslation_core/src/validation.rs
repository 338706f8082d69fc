//! Field constraints shared by the stores and the HTTP layer.
//!
//! Every check here is pure and runs before the database is touched.

use std::ops::RangeInclusive;

use itertools::Itertools;
use thiserror::Error;


pub const MINIMUM_PHRASE_TEXT_LENGTH: usize = 3;

pub const MINIMUM_MEANING_LENGTH: usize = 3;

pub const CONFIDENCE_RANGE: RangeInclusive<i32> = 0..=100;

pub const DEFAULT_CONFIDENCE: i32 = 50;

pub const WARNING_LEVEL_RANGE: RangeInclusive<i32> = 0..=5;

pub const DEFAULT_WARNING_LEVEL: i32 = 0;

/// Not real IP validation, just a sanity check on the voter identity.
pub const MINIMUM_VOTER_IP_LENGTH: usize = 7;


#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Phrase must be a string and at least {} characters long",
        MINIMUM_PHRASE_TEXT_LENGTH
    )]
    PhraseTextTooShort,

    #[error(
        "Meaning must be a string and at least {} characters long",
        MINIMUM_MEANING_LENGTH
    )]
    MeaningTooShort,

    #[error(
        "Confidence level must be an integer between {} and {}",
        CONFIDENCE_RANGE.start(),
        CONFIDENCE_RANGE.end()
    )]
    ConfidenceOutOfRange { confidence: i32 },

    #[error(
        "Warning level must be an integer between {} and {}",
        WARNING_LEVEL_RANGE.start(),
        WARNING_LEVEL_RANGE.end()
    )]
    WarningLevelOutOfRange { warning_level: i32 },

    #[error(
        "IP must be a string and at least {} characters long",
        MINIMUM_VOTER_IP_LENGTH
    )]
    VoterIpTooShort,
}


/// Character count, not byte count: phrases are frequently non-ASCII.
#[inline]
fn character_count(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_phrase_text(text: &str) -> Result<(), ValidationError> {
    if character_count(text) < MINIMUM_PHRASE_TEXT_LENGTH {
        return Err(ValidationError::PhraseTextTooShort);
    }

    Ok(())
}

pub fn validate_meaning_fields(
    meaning: &str,
    confidence: i32,
    warning_level: i32,
) -> Result<(), ValidationError> {
    if character_count(meaning) < MINIMUM_MEANING_LENGTH {
        return Err(ValidationError::MeaningTooShort);
    }

    if !CONFIDENCE_RANGE.contains(&confidence) {
        return Err(ValidationError::ConfidenceOutOfRange { confidence });
    }

    if !WARNING_LEVEL_RANGE.contains(&warning_level) {
        return Err(ValidationError::WarningLevelOutOfRange { warning_level });
    }

    Ok(())
}

pub fn validate_voter_ip(ip: &str) -> Result<(), ValidationError> {
    if character_count(ip) < MINIMUM_VOTER_IP_LENGTH {
        return Err(ValidationError::VoterIpTooShort);
    }

    Ok(())
}


/// Lower-cases and trims a single tag.
#[inline]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalizes tags as they are written: each tag is trimmed and lower-cased,
/// empty tags are dropped and duplicates collapse onto their first occurrence.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .unique()
        .collect()
}

/// Parses the comma-separated tag filter used by the phrase listing.
pub fn parse_tag_filter(comma_separated_tags: &str) -> Vec<String> {
    normalize_tags(comma_separated_tags.split(','))
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn phrase_text_needs_three_characters() {
        assert_eq!(
            validate_phrase_text("Hi"),
            Err(ValidationError::PhraseTextTooShort)
        );
        assert_eq!(validate_phrase_text("Hi!"), Ok(()));

        // Three characters, six bytes.
        assert_eq!(validate_phrase_text("ščž"), Ok(()));
    }

    #[test]
    fn meaning_bounds_are_inclusive() {
        assert_eq!(validate_meaning_fields("abc", 0, 0), Ok(()));
        assert_eq!(validate_meaning_fields("abc", 100, 5), Ok(()));

        assert_eq!(
            validate_meaning_fields("ab", 50, 0),
            Err(ValidationError::MeaningTooShort)
        );
        assert_eq!(
            validate_meaning_fields("abc", 101, 0),
            Err(ValidationError::ConfidenceOutOfRange { confidence: 101 })
        );
        assert_eq!(
            validate_meaning_fields("abc", -1, 0),
            Err(ValidationError::ConfidenceOutOfRange { confidence: -1 })
        );
        assert_eq!(
            validate_meaning_fields("abc", 50, 6),
            Err(ValidationError::WarningLevelOutOfRange { warning_level: 6 })
        );
    }

    #[test]
    fn voter_ip_sanity_check() {
        assert_eq!(validate_voter_ip("1.2.3.4"), Ok(()));
        assert_eq!(validate_voter_ip("::1"), Err(ValidationError::VoterIpTooShort));
    }

    #[test]
    fn tags_are_normalized_on_write() {
        assert_eq!(
            normalize_tags(["Comedic ", " Ominous"]),
            vec!["comedic".to_string(), "ominous".to_string()]
        );

        assert_eq!(
            normalize_tags(["Love", "love ", "  ", "TESTING"]),
            vec!["love".to_string(), "testing".to_string()]
        );
    }

    #[test]
    fn tag_filter_is_split_on_commas() {
        assert_eq!(
            parse_tag_filter("love, Testing ,,"),
            vec!["love".to_string(), "testing".to_string()]
        );
        assert!(parse_tag_filter("").is_empty());
    }

    #[test]
    fn validation_messages_are_human_readable() {
        assert_eq!(
            ValidationError::WarningLevelOutOfRange { warning_level: 9 }.to_string(),
            "Warning level must be an integer between 0 and 5"
        );
    }
}
