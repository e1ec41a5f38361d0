//! Answer tally and persona resolution.
//!
//! The winning letter is the most frequent one; among equal counts the letter
//! earliest in canonical order (A, B, C, D) wins.

use std::fmt;

use crate::error::{Error, Result};

use super::types::Letter;

/// Frequency of each letter across one response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [usize; 4],
}

impl Tally {
    pub fn from_answers(answers: &[Letter]) -> Self {
        let mut tally = Self::default();
        for letter in answers {
            tally.counts[letter.index()] += 1;
        }
        tally
    }

    pub fn count(&self, letter: Letter) -> usize {
        self.counts[letter.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Most frequent letter, `None` for an empty tally
    pub fn winner(&self) -> Option<Letter> {
        if self.total() == 0 {
            return None;
        }

        let mut best = Letter::A;
        for letter in Letter::ALL {
            // strict comparison keeps the earlier letter on ties
            if self.count(letter) > self.count(best) {
                best = letter;
            }
        }
        Some(best)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Letter::ALL
            .iter()
            .map(|l| format!("{}={}", l, self.count(*l)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Resolve the dominant letter of a response
pub fn resolve(answers: &[Letter]) -> Result<Letter> {
    Tally::from_answers(answers)
        .winner()
        .ok_or(Error::EmptyResponse)
}
