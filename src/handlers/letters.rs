use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::{debug, info};
use crate::handlers::{redirect, respond, session_id};
use crate::models::{AppState, LetterView, ROUTE_HOME};
use crate::services::letter_game::{LetterGame, TileOutOfRange, WordSource};

/// Letters game over the words fetched from the home view
#[get("/letters-game")]
pub async fn letters_game(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;

    if session.related_words.is_empty() {
        return redirect(ROUTE_HOME, id, created);
    }

    let playing_related = matches!(&session.letters, Some(game) if game.source() == WordSource::Related);
    if !playing_related {
        let words = session.related_words.clone();
        session.letters = LetterGame::new(words, WordSource::Related, &mut rand::thread_rng());
        if let Some(game) = &session.letters {
            info!("Started letters game with {} related words", game.word_count());
        }
    }

    match &session.letters {
        Some(game) => respond(HttpResponse::Ok(), id, created).json(LetterView::from(game)),
        None => redirect(ROUTE_HOME, id, created),
    }
}

/// Letters game over the built-in word list
#[get("/letters-game/classic")]
pub async fn classic_letters_game(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;

    let playing_classic = matches!(&session.letters, Some(game) if game.source() == WordSource::Classic);
    if !playing_classic {
        session.letters = LetterGame::new(
            data.classic_words.clone(),
            WordSource::Classic,
            &mut rand::thread_rng(),
        );
    }

    match &session.letters {
        Some(game) => respond(HttpResponse::Ok(), id, created).json(LetterView::from(game)),
        None => redirect(ROUTE_HOME, id, created),
    }
}

#[post("/letters-game/tiles/{index}")]
pub async fn click_tile(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<usize>,
) -> impl Responder {
    let index = path.into_inner();
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;

    let Some(game) = session.letters.as_mut() else {
        return redirect(ROUTE_HOME, id, created);
    };

    match game.click(index) {
        Ok(outcome) => {
            debug!("Tile {} clicked: {:?}", index, outcome);
            respond(HttpResponse::Ok(), id, created).json(LetterView::from(&*game))
        }
        Err(TileOutOfRange(index)) => respond(HttpResponse::BadRequest(), id, created)
            .body(format!("No tile at position {}", index)),
    }
}

#[post("/letters-game/new-word")]
pub async fn new_word(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;

    let Some(game) = session.letters.as_mut() else {
        return redirect(ROUTE_HOME, id, created);
    };

    game.new_word(&mut rand::thread_rng());
    respond(HttpResponse::Ok(), id, created).json(LetterView::from(&*game))
}
