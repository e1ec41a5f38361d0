//! Plain-text screens for the terminal front end.
//!
//! Every function writes to a caller-supplied writer so the session and the
//! tests can capture output.

use std::io::{self, Write};

use crate::quiz::{Letter, Question, Quiz, Scored, BANNER, FOOTER};
use crate::error::TransportFailure;
use crate::submission::{FallbackReason, SubmissionOutcome};

const RULE: &str = "---";
const CONNECT_NOTICE: &str = "⚠️ Could not connect to Google Sheet. Saving your response locally.";

pub fn intro<W: Write>(out: &mut W, quiz: &Quiz) -> io::Result<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "{}", quiz.title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", quiz.subtitle)?;
    if let Some(intro) = quiz.intro {
        writeln!(out)?;
        writeln!(out, "{}", intro)?;
    }
    writeln!(out, "{}", RULE)
}

/// One question with its lettered options
pub fn question<W: Write>(out: &mut W, number: usize, question: &Question) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Q{}. {}", number, question.prompt)?;
    for letter in Letter::ALL {
        writeln!(out, "  {}) {}", letter, question.option(letter))?;
    }
    Ok(())
}

/// All questions of an edition, without prompting
pub fn question_sheet<W: Write>(out: &mut W, quiz: &Quiz) -> io::Result<()> {
    writeln!(out, "{} ({})", quiz.title, quiz.variant)?;
    for (i, q) in quiz.questions.iter().enumerate() {
        question(out, i + 1, q)?;
    }
    Ok(())
}

pub fn result<W: Write>(
    out: &mut W,
    quiz: &Quiz,
    name: Option<&str>,
    scored: &Scored,
) -> io::Result<()> {
    let who = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(quiz.greeting_fallback);

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Hi {} — your {} is:", who, quiz.persona_label)?;
    writeln!(out)?;
    writeln!(out, "  {}", scored.persona.title)?;
    writeln!(out, "  {}", scored.persona.description)?;
    writeln!(out)?;
    writeln!(out, "{}", quiz.tips_heading)?;
    for tip in scored.persona.tips {
        writeln!(out, "  - {}", tip)?;
    }
    writeln!(out)
}

/// Delivery confirmation, or the fallback notice for this edition
pub fn outcome<W: Write>(out: &mut W, quiz: &Quiz, outcome: &SubmissionOutcome) -> io::Result<()> {
    match outcome {
        SubmissionOutcome::Delivered { .. } => writeln!(
            out,
            "✅ Your response has been recorded successfully in VisionFund's secure Google Sheet."
        ),
        SubmissionOutcome::SavedLocally { path, reason } => {
            match reason {
                FallbackReason::WebhookDisabled => {
                    writeln!(out, "Remote submission is turned off. Saving locally.")?
                }
                FallbackReason::DeliveryFailed(TransportFailure::Status(_)) => {
                    writeln!(out, "{}", quiz.status_notice)?
                }
                FallbackReason::DeliveryFailed(_) => writeln!(out, "{}", CONNECT_NOTICE)?,
            }
            writeln!(out, "💾 Your response has been saved locally as a fallback.")?;
            writeln!(out, "   ({})", path.display())
        }
    }
}

/// Shown when neither the webhook nor the local log took the response
pub fn not_saved<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "⚠️ Your response could not be saved. Please tell the quiz organiser.")
}

pub fn footer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", FOOTER)
}
