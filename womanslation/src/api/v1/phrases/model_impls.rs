use womanslation_core::api_models::{MeaningWithVotes, Phrase, Vote};
use womanslation_database::{
    entities::{MeaningVoteModel, PhraseMeaningWithVotesModel},
    store::PhraseWithMeaningsModel,
};

use crate::api::traits::IntoApiModel;



impl IntoApiModel<MeaningWithVotes> for PhraseMeaningWithVotesModel {
    fn into_api_model(self) -> MeaningWithVotes {
        MeaningWithVotes {
            id: self.meaning.id,
            phrase_id: self.meaning.phrase_id,
            meaning: self.meaning.meaning,
            tone: self.meaning.tone,
            confidence: self.meaning.confidence,
            warning_level: self.meaning.warning_level,
            create_date: self.meaning.create_date,
            like_count: self.like_count,
            is_liked_by_user: self.is_liked_by_voter,
        }
    }
}

impl IntoApiModel<Phrase> for PhraseWithMeaningsModel {
    fn into_api_model(self) -> Phrase {
        Phrase {
            id: self.phrase.id,
            text: self.phrase.text,
            suggested_response: self.phrase.suggested_response,
            tags: self.phrase.tags,
            views: self.phrase.views,
            create_date: self.phrase.create_date,
            meanings: self
                .meanings
                .into_iter()
                .map(IntoApiModel::into_api_model)
                .collect(),
        }
    }
}

impl IntoApiModel<Vote> for MeaningVoteModel {
    fn into_api_model(self) -> Vote {
        Vote {
            id: self.id,
            phrase_id: self.phrase_id,
            meaning_id: self.meaning_id,
            ip: self.ip,
            like: self.like,
            create_date: self.create_date,
        }
    }
}
