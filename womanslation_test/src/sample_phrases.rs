use womanslation_core::{
    api_models::{MeaningCreationRequest, PhraseCreationRequest},
    tone::Tone,
};


pub fn sample_meaning(meaning: &str, tone: Tone) -> MeaningCreationRequest {
    MeaningCreationRequest {
        meaning: meaning.to_string(),
        tone,
        confidence: 80,
        warning_level: 2,
    }
}

pub fn we_need_to_talk() -> PhraseCreationRequest {
    PhraseCreationRequest {
        text: "We need to talk.".to_string(),
        suggested_response: Some("Sure, what's on your mind?".to_string()),
        tags: vec!["Comedic ".to_string(), " Ominous".to_string()],
        meanings: vec![
            sample_meaning(
                "Something has been bothering me for a while.",
                Tone::HurtIndirect,
            ),
            MeaningCreationRequest {
                meaning: "Something festered.".to_string(),
                tone: Tone::AngryConfrontational,
                confidence: 98,
                warning_level: 5,
            },
        ],
    }
}

pub fn im_fine() -> PhraseCreationRequest {
    PhraseCreationRequest {
        text: "I'm fine.".to_string(),
        suggested_response: None,
        tags: vec!["classic".to_string()],
        meanings: vec![sample_meaning(
            "I am not fine at all.",
            Tone::PassiveAggressive,
        )],
    }
}

pub fn do_whatever_you_want() -> PhraseCreationRequest {
    PhraseCreationRequest {
        text: "Do whatever you want.".to_string(),
        suggested_response: None,
        tags: vec!["testing".to_string(), "love".to_string()],
        meanings: vec![sample_meaning(
            "Do what I want, or else.",
            Tone::Testing,
        )],
    }
}
