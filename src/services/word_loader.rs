use std::fs::File;
use std::io::{self, BufRead};
use log::{info, warn};
use crate::utils::distinct_words;

/// Built-in word list used by the classic letters game
pub const CLASSIC_WORDS: [&str; 10] = [
    "Casa", "Carro", "Computador", "Livro", "Caneta",
    "Mesa", "Cadeira", "Janela", "Porta", "Lápis",
];

/// Load words from a plain text file (one word per line), keeping their case
pub fn load_words(file_path: &str) -> io::Result<Vec<String>> {
    let file = File::open(file_path)?;
    let reader = io::BufReader::new(file);

    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }

    Ok(distinct_words(words))
}

/// Word list for the classic game: the file when given and usable, otherwise the built-in list
pub fn load_classic_words(file_path: Option<&str>) -> Vec<String> {
    let builtin = || CLASSIC_WORDS.iter().map(|w| w.to_string()).collect::<Vec<_>>();

    let Some(path) = file_path else {
        info!("Using {} built-in classic words.", CLASSIC_WORDS.len());
        return builtin();
    };

    match load_words(path) {
        Ok(words) if !words.is_empty() => {
            info!("Loaded {} classic words from {}.", words.len(), path);
            words
        }
        Ok(_) => {
            warn!("Word file {} is empty, using built-in classic words.", path);
            builtin()
        }
        Err(e) => {
            warn!("Failed to load word file {}: {}. Using built-in classic words.", path, e);
            builtin()
        }
    }
}
