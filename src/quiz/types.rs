//! Core quiz types: answer letters, questions, personas and variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────
// Answer Letter
// ─────────────────────────────────────────────────────────────────

/// One of the four option labels. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    /// All letters in canonical order
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
        }
    }

    /// Position in canonical order (A = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = Error;

    /// Accepts "b", " B ", or a full option label such as "B) Alert your team".
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars.next().and_then(Letter::from_char);
        let rest = chars.as_str();

        match letter {
            Some(letter) if rest.is_empty() || rest.starts_with(')') => Ok(letter),
            _ => Err(Error::invalid_answer(trimmed)),
        }
    }
}

/// Parse a comma or whitespace separated answer list such as "A,B,C,D"
pub fn parse_answers(input: &str) -> Result<Vec<Letter>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

// ─────────────────────────────────────────────────────────────────
// Questions & Personas
// ─────────────────────────────────────────────────────────────────

/// A multiple-choice question; `options[i]` is labeled `Letter::ALL[i]`
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
}

impl Question {
    pub fn option(&self, letter: Letter) -> &'static str {
        self.options[letter.index()]
    }
}

/// Descriptive profile assigned from the dominant answer letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub title: &'static str,
    pub description: &'static str,
    pub tips: &'static [&'static str],
}

// ─────────────────────────────────────────────────────────────────
// Quiz Variant
// ─────────────────────────────────────────────────────────────────

/// The quiz editions shipped with the tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizVariant {
    /// Senior management cyber leadership quiz
    #[default]
    Leadership,
    /// Staff phishing-awareness persona quiz
    Awareness,
}

impl QuizVariant {
    /// Slug used in config files and CLI args
    pub fn slug(&self) -> &'static str {
        match self {
            QuizVariant::Leadership => "leadership",
            QuizVariant::Awareness => "awareness",
        }
    }
}

impl fmt::Display for QuizVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for QuizVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "leadership" | "management" => Ok(QuizVariant::Leadership),
            "awareness" | "staff" => Ok(QuizVariant::Awareness),
            _ => Err(Error::UnknownVariant { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_parse_plain() {
        assert_eq!("A".parse::<Letter>().unwrap(), Letter::A);
        assert_eq!(" d ".parse::<Letter>().unwrap(), Letter::D);
    }

    #[test]
    fn test_letter_parse_option_label() {
        let letter: Letter = "B) Alert your team right away".parse().unwrap();
        assert_eq!(letter, Letter::B);
    }

    #[test]
    fn test_letter_parse_rejects_out_of_range() {
        for input in ["E", "", "AB", "1", "Alpha", "z)"] {
            let err = input.parse::<Letter>().unwrap_err();
            assert!(matches!(err, Error::InvalidAnswer { .. }), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_letter_order_is_tie_break_order() {
        assert!(Letter::A < Letter::B && Letter::B < Letter::C && Letter::C < Letter::D);
        assert_eq!(Letter::ALL.map(Letter::index), [0, 1, 2, 3]);
    }

    #[test]
    fn test_parse_answers() {
        assert_eq!(
            parse_answers("A,b, C  d").unwrap(),
            vec![Letter::A, Letter::B, Letter::C, Letter::D]
        );
        assert!(parse_answers("A,B,X,D").is_err());
        assert!(parse_answers("").unwrap().is_empty());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Leadership".parse::<QuizVariant>().unwrap(), QuizVariant::Leadership);
        assert_eq!("awareness".parse::<QuizVariant>().unwrap(), QuizVariant::Awareness);
        assert!(matches!(
            "trivia".parse::<QuizVariant>(),
            Err(Error::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_variant_serde_slug() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: QuizVariant,
        }
        let w: Wrapper = toml::from_str("variant = \"awareness\"").unwrap();
        assert_eq!(w.variant, QuizVariant::Awareness);
    }
}
