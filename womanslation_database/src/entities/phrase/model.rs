use chrono::{DateTime, Utc};
use uuid::Uuid;
use womanslation_core::id::PhraseId;

use crate::IntoExternalModel;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PhraseModel {
    pub id: PhraseId,

    pub text: String,

    pub suggested_response: Option<String>,

    pub tags: Vec<String>,

    pub views: i64,

    pub create_date: DateTime<Utc>,
}



#[derive(sqlx::FromRow)]
pub(crate) struct InternalPhraseModel {
    pub(crate) id: Uuid,

    pub(crate) text: String,

    pub(crate) suggested_response: Option<String>,

    pub(crate) tags: Vec<String>,

    pub(crate) views: i64,

    pub(crate) create_date: DateTime<Utc>,
}

impl IntoExternalModel for InternalPhraseModel {
    type ExternalModel = PhraseModel;

    fn into_external_model(self) -> Self::ExternalModel {
        Self::ExternalModel {
            id: PhraseId::new(self.id),
            text: self.text,
            suggested_response: self.suggested_response,
            tags: self.tags,
            views: self.views,
            create_date: self.create_date,
        }
    }
}
