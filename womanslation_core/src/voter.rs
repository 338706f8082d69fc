use std::fmt::{Display, Formatter};


/// Identifies an anonymous voter by the address the request came from.
///
/// No validation happens here: reads are enriched for any caller, and only
/// casting a vote requires a plausible address (see
/// [`validate_voter_ip`](crate::validation::validate_voter_ip)).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct VoterIp(String);

impl VoterIp {
    #[inline]
    pub fn new<S>(ip: S) -> Self
    where
        S: Into<String>,
    {
        Self(ip.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for VoterIp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
