pub mod countdown;
pub mod letter_game;
pub mod picture_game;
pub mod related_words;
pub mod session;
pub mod word_loader;
