//! Where quiz questions come from.
//!
//! A [`QuestionSource`] stands in for whatever turns study material into a
//! question list. Two sources ship with the crate: the built-in sample deck
//! and JSON decks on disk.

mod loader;
mod sample;

use crate::models::Deck;

pub use loader::{load_deck_from_json, JsonDeck, LoadError};
pub use sample::{sample_deck, SampleDeck, SAMPLE_DECK_TITLE};

/// Produces an ordered, validated deck for a new session.
pub trait QuestionSource {
    fn load(&self) -> Result<Deck, LoadError>;
}

impl<T: QuestionSource + ?Sized> QuestionSource for Box<T> {
    fn load(&self) -> Result<Deck, LoadError> {
        (**self).load()
    }
}
