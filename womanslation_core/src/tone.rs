//! The closed set of tones a meaning can be written in.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;


#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized tone: {label}")]
pub struct UnrecognizedToneError {
    pub label: String,
}


/// Emotional register of a meaning.
///
/// Serialized as the human-readable label (e.g. `"Cold / Dismissive"`),
/// which is also what gets stored in the database.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default, ToSchema)]
pub enum Tone {
    #[serde(rename = "Passive-aggressive")]
    PassiveAggressive,

    #[serde(rename = "Cold / Dismissive")]
    ColdDismissive,

    #[serde(rename = "Testing")]
    Testing,

    #[serde(rename = "Sarcastic")]
    Sarcastic,

    #[serde(rename = "Hurt / Indirect")]
    HurtIndirect,

    #[serde(rename = "Playful")]
    Playful,

    #[serde(rename = "Angry / Confrontational")]
    AngryConfrontational,

    /// Older clients send this label with a trailing tab.
    #[serde(rename = "Guilt-inducing", alias = "Guilt-inducing\t")]
    GuiltInducing,

    #[serde(rename = "Disappointed")]
    Disappointed,

    #[serde(rename = "Flirty / Teasing")]
    FlirtyTeasing,

    #[serde(rename = "Neutral / Literal")]
    NeutralLiteral,

    #[serde(rename = "Confusing on purpose")]
    ConfusingOnPurpose,

    #[serde(rename = "Manipulative")]
    Manipulative,

    #[serde(rename = "Affectionate / Sweet")]
    AffectionateSweet,

    #[serde(rename = "Insecure")]
    Insecure,

    #[default]
    #[serde(rename = "other")]
    Other,
}

impl Tone {
    pub const ALL: [Tone; 16] = [
        Self::PassiveAggressive,
        Self::ColdDismissive,
        Self::Testing,
        Self::Sarcastic,
        Self::HurtIndirect,
        Self::Playful,
        Self::AngryConfrontational,
        Self::GuiltInducing,
        Self::Disappointed,
        Self::FlirtyTeasing,
        Self::NeutralLiteral,
        Self::ConfusingOnPurpose,
        Self::Manipulative,
        Self::AffectionateSweet,
        Self::Insecure,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::PassiveAggressive => "Passive-aggressive",
            Self::ColdDismissive => "Cold / Dismissive",
            Self::Testing => "Testing",
            Self::Sarcastic => "Sarcastic",
            Self::HurtIndirect => "Hurt / Indirect",
            Self::Playful => "Playful",
            Self::AngryConfrontational => "Angry / Confrontational",
            Self::GuiltInducing => "Guilt-inducing",
            Self::Disappointed => "Disappointed",
            Self::FlirtyTeasing => "Flirty / Teasing",
            Self::NeutralLiteral => "Neutral / Literal",
            Self::ConfusingOnPurpose => "Confusing on purpose",
            Self::Manipulative => "Manipulative",
            Self::AffectionateSweet => "Affectionate / Sweet",
            Self::Insecure => "Insecure",
            Self::Other => "other",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, UnrecognizedToneError> {
        // The legacy label is the only one that ever carried whitespace.
        if label == "Guilt-inducing\t" {
            return Ok(Self::GuiltInducing);
        }

        Self::ALL
            .into_iter()
            .find(|tone| tone.label() == label)
            .ok_or_else(|| UnrecognizedToneError {
                label: label.to_string(),
            })
    }
}

impl FromStr for Tone {
    type Err = UnrecognizedToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Display for Tone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}



#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn has_sixteen_distinct_labels() {
        let labels: HashSet<&'static str> = Tone::ALL.iter().map(|tone| tone.label()).collect();

        assert_eq!(labels.len(), 16);
    }

    #[test]
    fn label_round_trips_through_from_label() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_label(tone.label()), Ok(tone));
        }
    }

    #[test]
    fn serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&Tone::AngryConfrontational).unwrap(),
            "\"Angry / Confrontational\""
        );

        assert_eq!(
            serde_json::from_str::<Tone>("\"Flirty / Teasing\"").unwrap(),
            Tone::FlirtyTeasing
        );
    }

    #[test]
    fn accepts_legacy_guilt_inducing_label() {
        assert_eq!(
            serde_json::from_str::<Tone>("\"Guilt-inducing\\t\"").unwrap(),
            Tone::GuiltInducing
        );
        assert_eq!(
            Tone::from_label("Guilt-inducing\t"),
            Ok(Tone::GuiltInducing)
        );
    }

    #[test]
    fn rejects_unknown_labels() {
        assert!(serde_json::from_str::<Tone>("\"Grumpy\"").is_err());
        assert!(Tone::from_label("playful").is_err());
    }

    #[test]
    fn defaults_to_other() {
        assert_eq!(Tone::default(), Tone::Other);
    }
}
