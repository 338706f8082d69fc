use actix_utils::future::{self, Ready};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use womanslation_core::voter::VoterIp;


const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";


/// Identifies the caller for vote aggregates and vote casting.
///
/// The first hop of `X-Forwarded-For` wins (the server is expected to run behind
/// a reverse proxy); otherwise the peer address of the connection is used.
/// If neither is available, the identity is empty, which is enough to read
/// but not to cast a vote.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VoterIdentity(VoterIp);

impl VoterIdentity {
    #[inline]
    pub fn voter_ip(&self) -> &VoterIp {
        &self.0
    }

    fn from_http_request(request: &HttpRequest) -> Self {
        let forwarded_for = request
            .headers()
            .get(FORWARDED_FOR_HEADER)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_value| header_value.split(',').next())
            .map(str::trim)
            .filter(|first_hop| !first_hop.is_empty());

        if let Some(first_hop) = forwarded_for {
            return Self(VoterIp::new(first_hop));
        }

        match request.peer_addr() {
            Some(peer_address) => Self(VoterIp::new(peer_address.ip().to_string())),
            None => Self(VoterIp::new(String::new())),
        }
    }
}

impl FromRequest for VoterIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        future::ok(Self::from_http_request(req))
    }
}



#[cfg(test)]
mod test {
    use std::net::SocketAddr;

    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn first_forwarded_hop_wins() {
        let request = TestRequest::default()
            .insert_header((FORWARDED_FOR_HEADER, " 203.0.113.7 , 10.0.0.1"))
            .peer_addr("192.168.1.20:53000".parse::<SocketAddr>().unwrap())
            .to_http_request();

        let identity = VoterIdentity::extract(&request).await.unwrap();

        assert_eq!(identity.voter_ip().as_str(), "203.0.113.7");
    }

    #[actix_web::test]
    async fn falls_back_to_peer_address_without_port() {
        let request = TestRequest::default()
            .peer_addr("192.168.1.20:53000".parse::<SocketAddr>().unwrap())
            .to_http_request();

        let identity = VoterIdentity::extract(&request).await.unwrap();

        assert_eq!(identity.voter_ip().as_str(), "192.168.1.20");
    }

    #[actix_web::test]
    async fn blank_forwarded_header_is_ignored() {
        let request = TestRequest::default()
            .insert_header((FORWARDED_FOR_HEADER, "  "))
            .peer_addr("10.1.2.3:80".parse::<SocketAddr>().unwrap())
            .to_http_request();

        let identity = VoterIdentity::extract(&request).await.unwrap();

        assert_eq!(identity.voter_ip().as_str(), "10.1.2.3");
    }

    #[actix_web::test]
    async fn unknown_caller_has_empty_identity() {
        let request = TestRequest::default().to_http_request();

        let identity = VoterIdentity::extract(&request).await.unwrap();

        assert_eq!(identity.voter_ip().as_str(), "");
    }
}
