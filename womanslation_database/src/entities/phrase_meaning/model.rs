use std::borrow::Cow;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use womanslation_core::{
    id::{MeaningId, PhraseId},
    tone::Tone,
};

use crate::TryIntoExternalModel;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseMeaningModel {
    pub id: MeaningId,

    pub phrase_id: PhraseId,

    pub meaning: String,

    pub tone: Tone,

    pub confidence: i32,

    pub warning_level: i32,

    pub create_date: DateTime<Utc>,
}


/// A meaning with vote aggregates computed for one particular voter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseMeaningWithVotesModel {
    pub meaning: PhraseMeaningModel,

    pub like_count: i64,

    pub is_liked_by_voter: bool,
}



#[derive(sqlx::FromRow)]
pub(crate) struct InternalPhraseMeaningModel {
    pub(crate) id: Uuid,

    pub(crate) phrase_id: Uuid,

    pub(crate) meaning: String,

    pub(crate) tone: String,

    pub(crate) confidence: i32,

    pub(crate) warning_level: i32,

    pub(crate) create_date: DateTime<Utc>,
}

impl TryIntoExternalModel for InternalPhraseMeaningModel {
    type ExternalModel = PhraseMeaningModel;
    type Error = Cow<'static, str>;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        let tone = Tone::from_label(&self.tone)
            .map_err(|error| Cow::from(format!("stored meaning has {error}")))?;

        Ok(Self::ExternalModel {
            id: MeaningId::new(self.id),
            phrase_id: PhraseId::new(self.phrase_id),
            meaning: self.meaning,
            tone,
            confidence: self.confidence,
            warning_level: self.warning_level,
            create_date: self.create_date,
        })
    }
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalPhraseMeaningWithVotesModel {
    #[sqlx(flatten)]
    pub(crate) meaning: InternalPhraseMeaningModel,

    pub(crate) like_count: i64,

    pub(crate) is_liked_by_voter: bool,
}

impl TryIntoExternalModel for InternalPhraseMeaningWithVotesModel {
    type ExternalModel = PhraseMeaningWithVotesModel;
    type Error = Cow<'static, str>;

    fn try_into_external_model(self) -> Result<Self::ExternalModel, Self::Error> {
        Ok(Self::ExternalModel {
            meaning: self.meaning.try_into_external_model()?,
            like_count: self.like_count,
            is_liked_by_voter: self.is_liked_by_voter,
        })
    }
}
