use chrono::{DateTime, Utc};
use uuid::Uuid;
use womanslation_core::id::{MeaningId, PhraseId, VoteId};

use crate::IntoExternalModel;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MeaningVoteModel {
    pub id: VoteId,

    pub phrase_id: PhraseId,

    pub meaning_id: MeaningId,

    pub ip: String,

    pub like: bool,

    pub create_date: DateTime<Utc>,
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UpsertedMeaningVoteModel {
    pub vote: MeaningVoteModel,

    /// `false` if an existing vote was overwritten.
    pub newly_created: bool,
}



#[derive(sqlx::FromRow)]
pub(crate) struct InternalMeaningVoteModel {
    pub(crate) id: Uuid,

    pub(crate) phrase_id: Uuid,

    pub(crate) meaning_id: Uuid,

    pub(crate) ip: String,

    pub(crate) liked: bool,

    pub(crate) create_date: DateTime<Utc>,
}

impl IntoExternalModel for InternalMeaningVoteModel {
    type ExternalModel = MeaningVoteModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: VoteId::new(self.id),
            phrase_id: PhraseId::new(self.phrase_id),
            meaning_id: MeaningId::new(self.meaning_id),
            ip: self.ip,
            like: self.liked,
            create_date: self.create_date,
        }
    }
}


#[derive(sqlx::FromRow)]
pub(crate) struct InternalUpsertedMeaningVoteModel {
    #[sqlx(flatten)]
    pub(crate) vote: InternalMeaningVoteModel,

    pub(crate) newly_created: bool,
}

impl IntoExternalModel for InternalUpsertedMeaningVoteModel {
    type ExternalModel = UpsertedMeaningVoteModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            vote: self.vote.into_external_model(),
            newly_created: self.newly_created,
        }
    }
}
