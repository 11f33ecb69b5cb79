use crate::models::{Deck, Question};

use super::{loader::LoadError, QuestionSource};

pub const SAMPLE_DECK_TITLE: &str = "Photosynthesis";

/// Built-in deck used when no question file is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDeck;

impl QuestionSource for SampleDeck {
    fn load(&self) -> Result<Deck, LoadError> {
        Ok(sample_deck())
    }
}

pub fn sample_deck() -> Deck {
    Deck {
        title: SAMPLE_DECK_TITLE.to_string(),
        questions: vec![
            Question::multiple_choice(
                1,
                "What is the main process by which plants convert light energy into chemical energy?",
                &["Respiration", "Photosynthesis", "Digestion", "Fermentation"],
                "Photosynthesis",
                "Photosynthesis is the process where plants use sunlight, carbon dioxide, and water to produce glucose and oxygen.",
            ),
            Question::fill_in_blank(
                2,
                "The green pigment in plants that captures light energy is called _______.",
                "chlorophyll",
                "Chlorophyll is the green pigment found in chloroplasts that absorbs light energy for photosynthesis.",
            ),
            Question::true_false(
                3,
                "Photosynthesis produces both glucose and oxygen as products.",
                true,
                "True. Photosynthesis produces glucose (food for the plant) and oxygen (released into the atmosphere).",
            ),
            Question::multiple_choice(
                4,
                "Which of the following is NOT a requirement for photosynthesis?",
                &["Sunlight", "Carbon dioxide", "Oxygen", "Water"],
                "Oxygen",
                "Oxygen is a product of photosynthesis, not a requirement. Plants need sunlight, carbon dioxide, and water.",
            ),
            Question::fill_in_blank(
                5,
                "Photosynthesis mainly occurs in the _______ of the plant.",
                "leaves",
                "Leaves contain the highest concentration of chloroplasts, making them the primary site of photosynthesis.",
            ),
        ],
    }
}
