use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::info;
use crate::handlers::{redirect, respond, session_id};
use crate::models::{AppState, HomeView, SeedForm, ROUTE_LETTERS};
use crate::services::related_words::RelatedWordFetcher;

pub const EMPTY_SEED_MESSAGE: &str = "Please type a word for the letters game!";
pub const NOTHING_FOUND_MESSAGE: &str = "Nothing found, try another word!";

#[get("/")]
pub async fn home(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, _, created) = data.sessions.resolve(session_id(&req)).await;
    respond(HttpResponse::Ok(), id, created).json(HomeView::new(None))
}

/// Fetch words related to the seed and hand them to the letters game
#[post("/")]
pub async fn submit_seed(
    req: HttpRequest,
    data: web::Data<AppState>,
    fetcher: web::Data<RelatedWordFetcher>,
    form: web::Form<SeedForm>,
) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;

    let seed = form.seed.trim();
    if seed.is_empty() {
        return respond(HttpResponse::BadRequest(), id, created)
            .json(HomeView::new(Some(EMPTY_SEED_MESSAGE)));
    }

    let words = fetcher.fetch_related(seed).await;
    if words.is_empty() {
        info!("No related words for '{}'", seed);
        return respond(HttpResponse::NotFound(), id, created)
            .json(HomeView::new(Some(NOTHING_FOUND_MESSAGE)));
    }

    {
        let mut session = handle.lock().await;
        session.related_words = words;
        session.letters = None;
    }

    redirect(ROUTE_LETTERS, id, created)
}
