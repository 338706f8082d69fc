use std::str::FromStr;


/// Marker trait implemented by all UUID-backed identifier newtypes.
///
/// Used by the HTTP layer to parse path parameters into the correct id type.
pub trait WomanslationUuidNewtype: FromStr {}


macro_rules! create_uuid_newtype {
    ($(#[$outer:meta])* $struct_name:ident) => {
        $(#[$outer])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[derive(serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = String, format = Uuid)]
        pub struct $struct_name(pub(crate) uuid::Uuid);

        impl $struct_name {
            #[inline]
            pub fn new(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            #[inline]
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            #[inline]
            pub fn into_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl std::str::FromStr for $struct_name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let inner_uuid = <uuid::Uuid as std::str::FromStr>::from_str(s)?;

                Ok(Self(inner_uuid))
            }
        }

        impl $crate::id::WomanslationUuidNewtype for $struct_name {}

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.hyphenated().fmt(f)
            }
        }
    };
}



create_uuid_newtype!(
    /// Identifies a phrase.
    PhraseId
);

create_uuid_newtype!(
    /// Identifies a meaning (always owned by exactly one phrase).
    MeaningId
);

create_uuid_newtype!(
    /// Identifies a single voter's vote on a meaning.
    VoteId
);
