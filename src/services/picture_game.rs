use std::num::IntErrorKind;
use rand::Rng;
use crate::utils::count_letter;

/// The letter players count in the animal's name
pub const COUNTED_LETTER: char = 'P';

pub const CORRECT_GUESS_MESSAGE: &str = "Correct! 🎉";
pub const ALREADY_SOLVED_MESSAGE: &str = "Already solved, the next animal is on its way.";
pub const CORRECT_COUNT_MESSAGE: &str = "Correct! ✅";
pub const INVALID_NUMBER_MESSAGE: &str = "Enter a valid number";

/// Emoji and the Portuguese name players must type
pub const ANIMALS: [(&str, &str); 25] = [
    ("🐶", "Cachorro"),
    ("🐱", "Gato"),
    ("🐭", "Rato"),
    ("🐹", "Hamster"),
    ("🐰", "Coelho"),
    ("🦊", "Raposa"),
    ("🐻", "Urso"),
    ("🐼", "Panda"),
    ("🐨", "Coala"),
    ("🐯", "Tigre"),
    ("🦁", "Leão"),
    ("🐮", "Vaca"),
    ("🐷", "Porco"),
    ("🐸", "Sapo"),
    ("🐵", "Macaco"),
    ("🐔", "Galinha"),
    ("🐧", "Pinguim"),
    ("🐦", "Pássaro"),
    ("🐤", "Pintinho"),
    ("🦅", "Águia"),
    ("🦉", "Coruja"),
    ("🦇", "Morcego"),
    ("🐺", "Lobo"),
    ("🦄", "Unicórnio"),
    ("🦋", "Borboleta"),
];

/// Proof that a correct guess happened in a given round.
/// Stale once the round changes, so a late countdown cannot touch a newer round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct(AdvanceTicket),
    Incorrect,
    AlreadySolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    Correct,
    Wrong { expected: usize },
    NotANumber,
}

#[derive(Debug, Clone)]
pub struct PictureGame {
    table: Vec<(&'static str, &'static str)>,
    current: usize,
    score: u32,
    generation: u64,
    solved: bool,
    countdown: Option<u8>,
    guess_input: String,
    guess_message: Option<String>,
    count_input: String,
    count_message: Option<String>,
}

impl PictureGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let table = ANIMALS.to_vec();
        let current = rng.gen_range(0..table.len());
        Self::starting_at(table, current)
    }

    /// Game over a custom table; `None` when the table is empty
    #[cfg(test)]
    pub fn with_table<R: Rng + ?Sized>(
        table: Vec<(&'static str, &'static str)>,
        rng: &mut R,
    ) -> Option<Self> {
        if table.is_empty() {
            return None;
        }
        let current = rng.gen_range(0..table.len());
        Some(Self::starting_at(table, current))
    }

    fn starting_at(table: Vec<(&'static str, &'static str)>, current: usize) -> Self {
        Self {
            table,
            current,
            score: 0,
            generation: 0,
            solved: false,
            countdown: None,
            guess_input: String::new(),
            guess_message: None,
            count_input: String::new(),
            count_message: None,
        }
    }

    pub fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        if self.solved {
            self.guess_message = Some(ALREADY_SOLVED_MESSAGE.to_string());
            return GuessOutcome::AlreadySolved;
        }

        let name = self.name();
        if text.trim().to_lowercase() == name.to_lowercase() {
            self.score += 1;
            self.solved = true;
            self.guess_message = Some(CORRECT_GUESS_MESSAGE.to_string());
            self.guess_input.clear();
            self.count_input.clear();
            GuessOutcome::Correct(AdvanceTicket(self.generation))
        } else {
            self.guess_message = Some(format!("Incorrect! The answer is: {}", name));
            self.guess_input = text.to_string();
            GuessOutcome::Incorrect
        }
    }

    pub fn submit_letter_count(&mut self, text: &str) -> CountOutcome {
        self.count_input = text.to_string();
        let expected = self.expected_count();

        let outcome = match text.trim().parse::<i64>() {
            Ok(n) if n == expected as i64 => CountOutcome::Correct,
            Ok(_) => CountOutcome::Wrong { expected },
            // Still a number, just far too large to be the count
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                CountOutcome::Wrong { expected }
            }
            Err(_) => CountOutcome::NotANumber,
        };

        self.count_message = Some(match outcome {
            CountOutcome::Correct => CORRECT_COUNT_MESSAGE.to_string(),
            CountOutcome::Wrong { expected } => {
                format!("Incorrect! It has {} letter(s) '{}'", expected, COUNTED_LETTER)
            }
            CountOutcome::NotANumber => INVALID_NUMBER_MESSAGE.to_string(),
        });
        outcome
    }

    /// Show a countdown value if the ticket still belongs to the current round
    pub fn tick(&mut self, ticket: AdvanceTicket, value: u8) -> bool {
        if !self.holds(ticket) {
            return false;
        }
        self.countdown = Some(value);
        true
    }

    /// Finish an auto-advance; does nothing for a stale ticket
    pub fn complete_advance<R: Rng + ?Sized>(&mut self, ticket: AdvanceTicket, rng: &mut R) -> bool {
        if !self.holds(ticket) {
            return false;
        }
        self.new_round(rng);
        true
    }

    /// Switch to another animal right away, invalidating any pending auto-advance
    pub fn new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.table.len() > 1 {
            // Pick among the other entries so the same icon never shows twice in a row
            let offset = rng.gen_range(1..self.table.len());
            self.current = (self.current + offset) % self.table.len();
        }
        self.generation += 1;
        self.solved = false;
        self.countdown = None;
        self.guess_input.clear();
        self.guess_message = None;
        self.count_input.clear();
        self.count_message = None;
    }

    fn holds(&self, ticket: AdvanceTicket) -> bool {
        ticket.0 == self.generation && self.solved
    }

    fn expected_count(&self) -> usize {
        count_letter(self.name(), COUNTED_LETTER)
    }

    pub fn icon(&self) -> &'static str {
        self.table[self.current].0
    }

    pub fn name(&self) -> &'static str {
        self.table[self.current].1
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn countdown(&self) -> Option<u8> {
        self.countdown
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn guess_input(&self) -> &str {
        &self.guess_input
    }

    pub fn guess_message(&self) -> Option<&str> {
        self.guess_message.as_deref()
    }

    pub fn count_input(&self) -> &str {
        &self.count_input
    }

    pub fn count_message(&self) -> Option<&str> {
        self.count_message.as_deref()
    }
}
