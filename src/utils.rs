use std::collections::HashSet;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::seq::SliceRandom;
use rand::Rng;

/// Everything but the RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Uppercase the first character and lowercase the rest ("gATO" -> "Gato")
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// True when every non-space character is alphabetic and at least one exists
pub fn is_alphabetic_ignoring_spaces(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| *c != ' ').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

/// Length in characters, not bytes ("pássaro" is 7)
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Count occurrences of a letter in a word, ignoring case
pub fn count_letter(word: &str, letter: char) -> usize {
    let target: Vec<char> = letter.to_lowercase().collect();
    word.chars()
        .filter(|c| c.to_lowercase().eq(target.iter().copied()))
        .count()
}

/// Split a word into its letters and return them in a uniformly random order
pub fn shuffle_letters<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Vec<char> {
    let mut letters: Vec<char> = word.chars().collect();
    letters.shuffle(rng);
    letters
}

/// Drop repeated entries, keeping the first occurrence of each word
pub fn distinct_words<I>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    words.into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Percent-encode a single URL path segment
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
