use std::time::Duration;
use log::debug;
use tokio::time::sleep;
use crate::services::picture_game::AdvanceTicket;
use crate::services::session::SessionHandle;

pub const COUNTDOWN_FROM: u8 = 3;
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What a countdown managed to do before finishing or going stale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceReport {
    pub shown: Vec<u8>,
    pub advanced: bool,
}

/// Count down 3, 2, 1 on the session's picture game, then move to a new animal.
/// Every step re-checks the ticket, so a manual new round cancels the rest.
pub async fn auto_advance(session: SessionHandle, ticket: AdvanceTicket, interval: Duration) -> AdvanceReport {
    let mut shown = Vec::new();

    for value in (1..=COUNTDOWN_FROM).rev() {
        let current = {
            let mut session = session.lock().await;
            session.pictures.as_mut()
                .map(|game| game.tick(ticket, value))
                .unwrap_or(false)
        };
        if !current {
            return AdvanceReport { shown, advanced: false };
        }
        shown.push(value);
        sleep(interval).await;
    }

    let advanced = {
        let mut session = session.lock().await;
        let mut rng = rand::thread_rng();
        session.pictures.as_mut()
            .map(|game| game.complete_advance(ticket, &mut rng))
            .unwrap_or(false)
    };

    AdvanceReport { shown, advanced }
}

/// Run the countdown in the background on the actix runtime
pub fn schedule(session: SessionHandle, ticket: AdvanceTicket, interval: Duration) {
    actix_web::rt::spawn(async move {
        let report = auto_advance(session, ticket, interval).await;
        if report.advanced {
            debug!("Auto-advanced after countdown {:?}", report.shown);
        } else {
            debug!("Countdown superseded after {:?}", report.shown);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::services::picture_game::{GuessOutcome, PictureGame};
    use crate::services::session::SessionStore;

    async fn solved_session() -> (SessionHandle, AdvanceTicket, &'static str) {
        let store = SessionStore::new(chrono::Duration::minutes(5));
        let (_, handle, _) = store.resolve(None).await;
        let mut rng = StdRng::seed_from_u64(21);
        let mut game = PictureGame::new(&mut rng);
        let icon = game.icon();
        let GuessOutcome::Correct(ticket) = game.submit_guess(game.name()) else {
            panic!("expected a correct guess");
        };
        handle.lock().await.pictures = Some(game);
        (handle, ticket, icon)
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_then_advances() {
        let (handle, ticket, icon) = solved_session().await;
        let started = tokio::time::Instant::now();

        let report = auto_advance(Arc::clone(&handle), ticket, TICK_INTERVAL).await;

        assert_eq!(report, AdvanceReport { shown: vec![3, 2, 1], advanced: true });
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(4));
        let session = handle.lock().await;
        let game = session.pictures.as_ref().unwrap();
        assert_ne!(game.icon(), icon);
        assert_eq!(game.countdown(), None);
        assert_eq!(game.score(), 1);
        assert_eq!(game.guess_input(), "");
        assert_eq!(game.count_input(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_is_visible_between_ticks() {
        let (handle, ticket, _) = solved_session().await;
        let task = tokio::spawn(auto_advance(Arc::clone(&handle), ticket, TICK_INTERVAL));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(handle.lock().await.pictures.as_ref().unwrap().countdown(), Some(3));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(handle.lock().await.pictures.as_ref().unwrap().countdown(), Some(2));

        assert!(task.await.unwrap().advanced);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_round_cancels_pending_advance() {
        let (handle, ticket, _) = solved_session().await;
        let task = tokio::spawn(auto_advance(Arc::clone(&handle), ticket, TICK_INTERVAL));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let manual_icon = {
            let mut session = handle.lock().await;
            let game = session.pictures.as_mut().unwrap();
            game.new_round(&mut StdRng::seed_from_u64(99));
            game.icon()
        };

        let report = task.await.unwrap();
        assert_eq!(report, AdvanceReport { shown: vec![3, 2], advanced: false });
        let session = handle.lock().await;
        assert_eq!(session.pictures.as_ref().unwrap().icon(), manual_icon);
        assert_eq!(session.pictures.as_ref().unwrap().countdown(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_game_stops_immediately() {
        let handle: SessionHandle = {
            let store = SessionStore::new(chrono::Duration::minutes(5));
            store.resolve(None).await.1
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = PictureGame::new(&mut rng);
        let GuessOutcome::Correct(ticket) = game.submit_guess(game.name()) else {
            panic!("expected a correct guess");
        };
        let report = auto_advance(handle, ticket, TICK_INTERVAL).await;
        assert_eq!(report, AdvanceReport { shown: Vec::new(), advanced: false });
    }
}
