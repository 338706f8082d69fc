use actix_web::{web, Scope};

mod endpoints;

pub use endpoints::*;


/// Router for votes that are not scoped to a single phrase.
/// Lives under the `/api/v1/votes` path.
pub fn votes_router() -> Scope {
    web::scope("/votes").service(get_own_likes)
}
