use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::id::{MeaningId, PhraseId, VoteId};


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct Vote {
    pub id: VoteId,

    /// Kept so that all votes of a phrase can be removed together with it.
    pub phrase_id: PhraseId,

    pub meaning_id: MeaningId,

    pub ip: String,

    pub like: bool,

    /// When the vote was first cast or last changed.
    pub create_date: DateTime<Utc>,
}


#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug, IntoParams)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Serialize))]
#[into_params(parameter_in = Query)]
pub struct VoteRequest {
    /// `true` to like the meaning, `false` to take the like back.
    pub like: bool,
}


#[derive(Serialize, Clone, PartialEq, Eq, Debug, ToSchema)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(Deserialize))]
pub struct VoteCastResponse {
    pub vote: Vote,

    /// `false` when an existing vote of this voter was overwritten.
    pub newly_created: bool,

    /// Number of likes the meaning has after this vote.
    pub like_count: i64,
}
