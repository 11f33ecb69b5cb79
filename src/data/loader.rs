use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::{validate_questions, Deck, QuestionError};

use super::QuestionSource;

/// Errors while loading a deck.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid deck {title:?}: {source}")]
    Invalid {
        title: String,
        #[source]
        source: QuestionError,
    },
}

/// A deck stored as JSON on disk.
///
/// ```json
/// { "title": "Photosynthesis", "questions": [ { "id": 1, "kind": "true_false", ... } ] }
/// ```
#[derive(Debug, Clone)]
pub struct JsonDeck {
    path: PathBuf,
}

impl JsonDeck {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for JsonDeck {
    fn load(&self) -> Result<Deck, LoadError> {
        load_deck_from_json(&self.path)
    }
}

pub fn load_deck_from_json<P: AsRef<Path>>(path: P) -> Result<Deck, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let deck: Deck = serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_deck(&deck)?;
    debug!(path = %path.display(), questions = deck.questions.len(), "deck loaded");
    Ok(deck)
}

fn validate_deck(deck: &Deck) -> Result<(), LoadError> {
    validate_questions(&deck.questions).map_err(|source| LoadError::Invalid {
        title: deck.title.clone(),
        source,
    })
}
