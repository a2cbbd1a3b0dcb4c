use std::sync::Arc;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::{debug, info};
use crate::handlers::{respond, session_id};
use crate::models::{AppState, CountForm, GuessForm, PictureView};
use crate::services::countdown::{self, COUNTDOWN_FROM};
use crate::services::picture_game::{GuessOutcome, PictureGame};

#[get("/pictures-game")]
pub async fn pictures_game(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;
    let game = session.pictures.get_or_insert_with(|| PictureGame::new(&mut rand::thread_rng()));
    respond(HttpResponse::Ok(), id, created).json(PictureView::from(&*game))
}

#[post("/pictures-game/guess")]
pub async fn submit_guess(
    req: HttpRequest,
    data: web::Data<AppState>,
    form: web::Form<GuessForm>,
) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;
    let game = session.pictures.get_or_insert_with(|| PictureGame::new(&mut rand::thread_rng()));

    let outcome = game.submit_guess(&form.guess);
    if let GuessOutcome::Correct(ticket) = outcome {
        // First value goes out with this response, the task keeps it for a full interval
        game.tick(ticket, COUNTDOWN_FROM);
    }
    let view = PictureView::from(&*game);
    drop(session);

    match outcome {
        GuessOutcome::Correct(ticket) => {
            info!("Correct guess, score now {}", view.score);
            countdown::schedule(Arc::clone(&handle), ticket, data.countdown_interval);
        }
        other => debug!("Guess '{}': {:?}", form.guess, other),
    }

    respond(HttpResponse::Ok(), id, created).json(view)
}

#[post("/pictures-game/letter-count")]
pub async fn submit_letter_count(
    req: HttpRequest,
    data: web::Data<AppState>,
    form: web::Form<CountForm>,
) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;
    let game = session.pictures.get_or_insert_with(|| PictureGame::new(&mut rand::thread_rng()));

    let outcome = game.submit_letter_count(&form.count);
    debug!("Letter count '{}': {:?}", form.count, outcome);
    respond(HttpResponse::Ok(), id, created).json(PictureView::from(&*game))
}

/// Next animal right away; any countdown still running becomes stale
#[post("/pictures-game/new-round")]
pub async fn new_round(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let (id, handle, created) = data.sessions.resolve(session_id(&req)).await;
    let mut session = handle.lock().await;
    let mut rng = rand::thread_rng();
    let game = session.pictures.get_or_insert_with(|| PictureGame::new(&mut rng));

    game.new_round(&mut rng);
    respond(HttpResponse::Ok(), id, created).json(PictureView::from(&*game))
}
