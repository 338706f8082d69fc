use serde::Deserialize;

use crate::traits::Resolve;


pub(crate) type UnresolvedSeedingConfiguration = SeedingConfiguration;

#[derive(Deserialize, Debug, Clone)]
pub struct SeedingConfiguration {
    /// Whether to load the example phrases on startup
    /// when the database contains no phrases at all.
    #[serde(default = "default_seed_example_phrases_when_empty")]
    pub seed_example_phrases_when_empty: bool,
}

const fn default_seed_example_phrases_when_empty() -> bool {
    true
}

impl Default for SeedingConfiguration {
    fn default() -> Self {
        Self {
            seed_example_phrases_when_empty: default_seed_example_phrases_when_empty(),
        }
    }
}

impl Resolve for UnresolvedSeedingConfiguration {
    type Resolved = SeedingConfiguration;

    fn resolve(self) -> Self::Resolved {
        self
    }
}
