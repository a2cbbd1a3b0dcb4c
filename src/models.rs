use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::services::letter_game::{LetterGame, TileState, WordSource};
use crate::services::picture_game::{PictureGame, COUNTED_LETTER};
use crate::services::session::SessionStore;

pub const ROUTE_HOME: &str = "/";
pub const ROUTE_LETTERS: &str = "/letters-game";
pub const ROUTE_LETTERS_CLASSIC: &str = "/letters-game/classic";
pub const ROUTE_PICTURES: &str = "/pictures-game";

/// Application state shared across all handlers
pub struct AppState {
    pub sessions: SessionStore,
    pub classic_words: Vec<String>,
    pub countdown_interval: Duration,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub route: String,
}

impl Link {
    fn new(label: &str, route: &str) -> Self {
        Self { label: label.to_string(), route: route.to_string() }
    }
}

fn links_except(current: &str) -> Vec<Link> {
    [
        ("Home", ROUTE_HOME),
        ("Letters game", ROUTE_LETTERS),
        ("Classic letters game", ROUTE_LETTERS_CLASSIC),
        ("Pictures game", ROUTE_PICTURES),
    ]
    .iter()
    .filter(|(_, route)| *route != current)
    .map(|(label, route)| Link::new(label, route))
    .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeView {
    pub route: String,
    pub title: String,
    pub links: Vec<Link>,
    pub message: Option<String>,
}

impl HomeView {
    pub fn new(message: Option<&str>) -> Self {
        Self {
            route: ROUTE_HOME.to_string(),
            title: "Educational games".to_string(),
            links: links_except(ROUTE_HOME),
            message: message.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TileView {
    pub index: usize,
    pub letter: char,
    pub matched: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LetterView {
    pub route: String,
    pub source: String,
    pub word: String,
    pub tiles: Vec<TileView>,
    pub match_index: usize,
    pub won: bool,
    pub message: Option<String>,
    pub links: Vec<Link>,
}

impl From<&LetterGame> for LetterView {
    fn from(game: &LetterGame) -> Self {
        let (route, source) = match game.source() {
            WordSource::Related => (ROUTE_LETTERS, "related"),
            WordSource::Classic => (ROUTE_LETTERS_CLASSIC, "classic"),
        };
        Self {
            route: route.to_string(),
            source: source.to_string(),
            word: game.word().to_string(),
            tiles: game.tiles().iter()
                .enumerate()
                .map(|(index, tile)| TileView {
                    index,
                    letter: tile.letter,
                    matched: tile.state == TileState::Matched,
                })
                .collect(),
            match_index: game.match_index(),
            won: game.is_won(),
            message: game.message().map(str::to_string),
            links: links_except(route),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PictureView {
    pub route: String,
    pub icon: String,
    pub score: u32,
    pub countdown: Option<u8>,
    pub solved: bool,
    pub guess_input: String,
    pub guess_message: Option<String>,
    pub counted_letter: char,
    pub count_input: String,
    pub count_message: Option<String>,
    pub links: Vec<Link>,
}

impl From<&PictureGame> for PictureView {
    fn from(game: &PictureGame) -> Self {
        Self {
            route: ROUTE_PICTURES.to_string(),
            icon: game.icon().to_string(),
            score: game.score(),
            countdown: game.countdown(),
            solved: game.is_solved(),
            guess_input: game.guess_input().to_string(),
            guess_message: game.guess_message().map(str::to_string),
            counted_letter: COUNTED_LETTER,
            count_input: game.count_input().to_string(),
            count_message: game.count_message().map(str::to_string),
            links: links_except(ROUTE_PICTURES),
        }
    }
}

#[derive(Deserialize)]
pub struct SeedForm {
    #[serde(default)]
    pub seed: String,
}

#[derive(Deserialize)]
pub struct GuessForm {
    #[serde(default)]
    pub guess: String,
}

#[derive(Deserialize)]
pub struct CountForm {
    #[serde(default)]
    pub count: String,
}
