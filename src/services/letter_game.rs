use std::collections::HashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use crate::utils::{distinct_words, shuffle_letters};

pub const WRONG_LETTER_MESSAGE: &str = "Wrong letter. Try again!";
pub const WIN_MESSAGE: &str = "Congratulations! You got the word right!";

/// Where the game's word list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSource {
    Related,
    Classic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Open,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub letter: char,
    pub state: TileState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Matched,
    Won,
    Wrong,
    /// Tile already matched, or the word is already complete
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileOutOfRange(pub usize);

#[derive(Debug, Clone)]
pub struct LetterGame {
    words: Vec<String>,
    used: HashSet<String>,
    source: WordSource,
    target: Vec<char>,
    word: String,
    tiles: Vec<Tile>,
    match_index: usize,
    message: Option<String>,
}

impl LetterGame {
    /// Start a game over `words`; `None` when the list holds no usable word
    pub fn new<R: Rng + ?Sized>(words: Vec<String>, source: WordSource, rng: &mut R) -> Option<Self> {
        let words = distinct_words(
            words.into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty()),
        );
        if words.is_empty() {
            return None;
        }

        let mut game = Self {
            words,
            used: HashSet::new(),
            source,
            target: Vec::new(),
            word: String::new(),
            tiles: Vec::new(),
            match_index: 0,
            message: None,
        };
        game.new_word(rng);
        Some(game)
    }

    /// Move on to an unused word (all words become available again once exhausted)
    pub fn new_word<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut available: Vec<&String> = self.words.iter()
            .filter(|w| !self.used.contains(*w))
            .collect();
        if available.is_empty() {
            self.used.clear();
            available = self.words.iter().collect();
        }

        // `words` is never empty, so neither is `available`
        let Some(word) = available.choose(rng).map(|w| (*w).clone()) else {
            return;
        };
        self.used.insert(word.clone());

        self.tiles = shuffle_letters(&word, rng)
            .into_iter()
            .map(|letter| Tile { letter, state: TileState::Open })
            .collect();
        self.target = word.chars().collect();
        self.word = word;
        self.match_index = 0;
        self.message = None;
    }

    pub fn click(&mut self, tile_index: usize) -> Result<ClickOutcome, TileOutOfRange> {
        let tile = self.tiles.get_mut(tile_index).ok_or(TileOutOfRange(tile_index))?;

        if tile.state == TileState::Matched || self.match_index >= self.target.len() {
            return Ok(ClickOutcome::Ignored);
        }

        if tile.letter != self.target[self.match_index] {
            self.message = Some(WRONG_LETTER_MESSAGE.to_string());
            return Ok(ClickOutcome::Wrong);
        }

        tile.state = TileState::Matched;
        self.match_index += 1;

        if self.match_index == self.target.len() {
            self.message = Some(WIN_MESSAGE.to_string());
            Ok(ClickOutcome::Won)
        } else {
            self.message = None;
            Ok(ClickOutcome::Matched)
        }
    }

    pub fn is_won(&self) -> bool {
        self.match_index == self.target.len()
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn match_index(&self) -> usize {
        self.match_index
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn source(&self) -> WordSource {
        self.source
    }

    /// Number of distinct words the game cycles through
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    fn with_tiles(word: &str, letters: &[char]) -> Self {
        Self {
            words: vec![word.to_string()],
            used: HashSet::from([word.to_string()]),
            source: WordSource::Classic,
            target: word.chars().collect(),
            word: word.to_string(),
            tiles: letters.iter()
                .map(|&letter| Tile { letter, state: TileState::Open })
                .collect(),
            match_index: 0,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_word_list_has_no_game() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(LetterGame::new(Vec::new(), WordSource::Related, &mut rng).is_none());
        assert!(LetterGame::new(words(&["", "  "]), WordSource::Related, &mut rng).is_none());
    }

    #[test]
    fn test_casa_in_order_wins() {
        // Tiles shuffled to [A, S, A, C]
        let mut game = LetterGame::with_tiles("CASA", &['A', 'S', 'A', 'C']);
        assert_eq!(game.click(3), Ok(ClickOutcome::Matched)); // C
        assert_eq!(game.click(0), Ok(ClickOutcome::Matched)); // A
        assert_eq!(game.click(1), Ok(ClickOutcome::Matched)); // S
        assert!(!game.is_won());
        assert_eq!(game.click(2), Ok(ClickOutcome::Won)); // A
        assert!(game.is_won());
        assert_eq!(game.message(), Some(WIN_MESSAGE));
        assert!(game.tiles().iter().all(|t| t.state == TileState::Matched));
    }

    #[test]
    fn test_wrong_letter_keeps_match_index() {
        let mut game = LetterGame::with_tiles("CASA", &['A', 'S', 'A', 'C']);
        assert_eq!(game.click(1), Ok(ClickOutcome::Wrong)); // S first
        assert_eq!(game.match_index(), 0);
        assert_eq!(game.message(), Some(WRONG_LETTER_MESSAGE));
        assert_eq!(game.tiles()[1].state, TileState::Open);

        // A correct click clears the transient message
        assert_eq!(game.click(3), Ok(ClickOutcome::Matched));
        assert_eq!(game.message(), None);
    }

    #[test]
    fn test_matched_tile_cannot_advance_twice() {
        let mut game = LetterGame::with_tiles("ANA", &['A', 'N', 'A']);
        assert_eq!(game.click(0), Ok(ClickOutcome::Matched));
        assert_eq!(game.click(0), Ok(ClickOutcome::Ignored));
        assert_eq!(game.match_index(), 1);

        let mut double = LetterGame::with_tiles("AAB", &['B', 'A', 'A']);
        assert_eq!(double.click(1), Ok(ClickOutcome::Matched));
        assert_eq!(double.click(1), Ok(ClickOutcome::Ignored));
        assert_eq!(double.match_index(), 1);
        assert_eq!(double.click(2), Ok(ClickOutcome::Matched));
        assert_eq!(double.click(0), Ok(ClickOutcome::Won));
    }

    #[test]
    fn test_clicks_after_win_are_ignored() {
        let mut game = LetterGame::with_tiles("OI", &['I', 'O']);
        game.click(1).unwrap();
        game.click(0).unwrap();
        assert!(game.is_won());
        assert_eq!(game.click(0), Ok(ClickOutcome::Ignored));
        assert_eq!(game.match_index(), 2);
    }

    #[test]
    fn test_out_of_range_tile() {
        let mut game = LetterGame::with_tiles("OI", &['I', 'O']);
        assert_eq!(game.click(2), Err(TileOutOfRange(2)));
        assert_eq!(game.match_index(), 0);
        assert_eq!(game.message(), None);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let mut game = LetterGame::with_tiles("Oi", &['o', 'i', 'O']);
        assert_eq!(game.click(0), Ok(ClickOutcome::Wrong));
        assert_eq!(game.click(2), Ok(ClickOutcome::Matched));
    }

    #[test]
    fn test_every_word_used_before_repeating() {
        let mut rng = StdRng::seed_from_u64(42);
        let list = words(&["Casa", "Carro", "Livro", "Mesa", "Porta"]);
        let mut game = LetterGame::new(list.clone(), WordSource::Classic, &mut rng).unwrap();

        for _ in 0..4 {
            let mut seen = HashSet::from([game.word().to_string()]);
            for _ in 1..list.len() {
                game.new_word(&mut rng);
                assert!(seen.insert(game.word().to_string()), "{} repeated early", game.word());
            }
            assert_eq!(seen.len(), list.len());
            game.new_word(&mut rng);
        }
    }

    #[test]
    fn test_duplicates_count_once_for_exhaustion() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = LetterGame::new(
            words(&["Gol", "Gol", "Bola", "Gol"]),
            WordSource::Related,
            &mut rng,
        ).unwrap();
        assert_eq!(game.word_count(), 2);

        let first = game.word().to_string();
        game.new_word(&mut rng);
        assert_ne!(game.word(), first);
    }

    #[test]
    fn test_new_word_resets_round() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = LetterGame::new(words(&["Janela", "Caneta"]), WordSource::Classic, &mut rng).unwrap();
        let first_letter = game.word().chars().next().unwrap();
        let index = game.tiles().iter().position(|t| t.letter == first_letter).unwrap();
        game.click(index).unwrap();
        assert_eq!(game.match_index(), 1);

        game.new_word(&mut rng);
        assert_eq!(game.match_index(), 0);
        assert_eq!(game.message(), None);
        assert!(game.tiles().iter().all(|t| t.state == TileState::Open));

        let mut letters: Vec<char> = game.tiles().iter().map(|t| t.letter).collect();
        let mut expected: Vec<char> = game.word().chars().collect();
        letters.sort_unstable();
        expected.sort_unstable();
        assert_eq!(letters, expected);
    }
}
