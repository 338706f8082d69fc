//! Phrases, their meanings and the votes on those meanings.

use actix_web::{web, Scope};

mod endpoints;
mod model_impls;

pub use endpoints::*;


/// Router for phrases and everything nested under them.
/// Lives under the `/api/v1/phrases` path.
///
/// Routes with literal segments (`/search/...`, `/by-text/...`) are registered
/// before `/{phrase_id}`, which would otherwise capture them.
#[rustfmt::skip]
pub fn phrases_router() -> Scope {
    web::scope("/phrases")
        .service(get_phrases)
        .service(create_phrase)
        .service(search_phrases_by_text)
        .service(search_phrases_by_tag)
        .service(get_phrase_by_text)
        .service(get_phrase_by_id)
        .service(update_phrase)
        .service(view_phrase)
        .service(delete_phrase)
        .service(get_phrase_meanings)
        .service(create_phrase_meaning)
        .service(delete_all_phrase_meanings)
        .service(update_phrase_meaning)
        .service(delete_phrase_meaning)
        .service(cast_vote)
        .service(delete_vote)
}
