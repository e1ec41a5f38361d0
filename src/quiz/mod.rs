//! Quiz content and scoring.
//!
//! A quiz edition is static data (questions plus a persona per letter). Scoring
//! tallies the chosen letters and looks the winner up in the persona table.

pub mod catalog;
pub mod resolver;
pub mod types;

pub use catalog::{Quiz, BANNER, FOOTER};
pub use resolver::{resolve, Tally};
pub use types::{parse_answers, Letter, Persona, Question, QuizVariant};

use crate::error::{Error, Result};

/// Result of scoring one response
#[derive(Debug, Clone, Copy)]
pub struct Scored {
    pub letter: Letter,
    pub tally: Tally,
    pub persona: &'static Persona,
}

impl Quiz {
    pub fn persona(&'static self, letter: Letter) -> &'static Persona {
        &self.personas[letter.index()]
    }

    /// Score a full response; one answer per question is required
    pub fn score(&'static self, answers: &[Letter]) -> Result<Scored> {
        if answers.len() != self.questions.len() {
            return Err(Error::AnswerCountMismatch {
                expected: self.questions.len(),
                actual: answers.len(),
            });
        }

        let letter = resolve(answers)?;
        Ok(Scored {
            letter,
            tally: Tally::from_answers(answers),
            persona: self.persona(letter),
        })
    }
}
