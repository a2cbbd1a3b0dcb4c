pub mod home;
pub mod letters;
pub mod pictures;

use actix_web::cookie::Cookie;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "word_games_sid";

/// Session id carried by the request's cookie, if any
pub fn session_id(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .finish()
}

/// Response builder that hands out the cookie when the session is new
pub fn respond(mut builder: HttpResponseBuilder, id: Uuid, created: bool) -> HttpResponseBuilder {
    if created {
        builder.cookie(session_cookie(id));
    }
    builder
}

pub fn redirect(to: &str, id: Uuid, created: bool) -> HttpResponse {
    respond(HttpResponse::SeeOther(), id, created)
        .insert_header((LOCATION, to))
        .finish()
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::web;
    use crate::models::AppState;
    use crate::services::session::SessionStore;
    use crate::services::word_loader::load_classic_words;
    use super::SESSION_COOKIE;

    pub fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState {
            sessions: SessionStore::new(chrono::Duration::minutes(5)),
            classic_words: load_classic_words(None),
            countdown_interval: Duration::from_millis(10),
        })
    }

    pub fn cookie_of(resp: &ServiceResponse) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.into_owned())
    }
}
