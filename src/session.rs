//! Interactive quiz over a line-oriented reader and writer.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::quiz::{Letter, Quiz};
use crate::render;

/// Everything collected from one pass through the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub name: Option<String>,
    pub department: Option<String>,
    pub letters: Vec<Letter>,
}

pub struct Session<R, W> {
    quiz: &'static Quiz,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(quiz: &'static Quiz, input: R, output: W) -> Self {
        Self { quiz, input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Show the intro, ask for the optional details, then every question.
    ///
    /// Invalid letters are asked again. Running out of input before the last
    /// question is `AnswerCountMismatch`.
    pub fn run(&mut self) -> Result<Answers> {
        render::intro(&mut self.output, self.quiz)?;

        let name = self.ask_text("Your name (optional): ")?;
        let department = self.ask_text("Department (optional): ")?;

        let mut letters = Vec::with_capacity(self.quiz.questions.len());
        for (i, question) in self.quiz.questions.iter().enumerate() {
            render::question(&mut self.output, i + 1, question)?;
            match self.ask_letter()? {
                Some(letter) => letters.push(letter),
                None => {
                    return Err(Error::AnswerCountMismatch {
                        expected: self.quiz.questions.len(),
                        actual: letters.len(),
                    })
                }
            }
        }

        debug!(answered = letters.len(), "Quiz completed");
        Ok(Answers {
            name,
            department,
            letters,
        })
    }

    fn ask_text(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        Ok(self
            .read_line()?
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()))
    }

    /// `None` on end of input
    fn ask_letter(&mut self) -> Result<Option<Letter>> {
        loop {
            write!(self.output, "Your answer [A-D]: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(None);
            };

            match line.parse::<Letter>() {
                Ok(letter) => return Ok(Some(letter)),
                Err(Error::InvalidAnswer { input }) => {
                    debug!(%input, "Rejected answer");
                    writeln!(self.output, "Please choose A, B, C or D.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
