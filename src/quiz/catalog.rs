//! Bundled quiz editions. Every table here is immutable static data.

use super::types::{Persona, Question, QuizVariant};

/// A complete quiz edition: wording, questions, persona table and endpoint
#[derive(Debug)]
pub struct Quiz {
    pub variant: QuizVariant,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Leading paragraph; the awareness edition goes straight to the questions
    pub intro: Option<&'static str>,
    pub questions: &'static [Question],
    /// Indexed by `Letter::index()`
    pub personas: [Persona; 4],
    /// Heading shown above the tip list
    pub tips_heading: &'static str,
    /// Used in the greeting when no name was given
    pub greeting_fallback: &'static str,
    /// How the result is named in the greeting
    pub persona_label: &'static str,
    /// Shown when the endpoint answered with a status other than 200
    pub status_notice: &'static str,
    /// Google Apps Script endpoint that appends rows to the results sheet
    pub webhook_url: &'static str,
}

impl Quiz {
    pub fn for_variant(variant: QuizVariant) -> &'static Quiz {
        match variant {
            QuizVariant::Leadership => &LEADERSHIP,
            QuizVariant::Awareness => &AWARENESS,
        }
    }
}

impl QuizVariant {
    pub fn default_webhook_url(&self) -> &'static str {
        Quiz::for_variant(*self).webhook_url
    }
}

pub const BANNER: &str = "YOU Make the Difference in Cybersecurity";
pub const FOOTER: &str = "VisionFund MFI — YOU Make the Difference in Cybersecurity";

static LEADERSHIP: Quiz = Quiz {
    variant: QuizVariant::Leadership,
    title: "VisionFund MFI — Senior Management Cyber Leadership Quiz",
    subtitle: "Discover Your Cyber Leadership Style",
    intro: Some("Cybersecurity is not just an IT concern — it's a leadership responsibility.\n\
            This quick reflection helps you see how your decision-making style supports \
            a strong culture of security and trust.\n\n\
            There are no right or wrong answers — each style brings value to how VisionFund \
            protects its people and data.\n\
            Answer honestly, and see which Cyber Leadership Persona best reflects you."),
    questions: &[
        Question {
            prompt: "You receive news that one of your branches is facing a potential security \
                     issue affecting customer data. What's your first action as a leader?",
            options: [
                "Ask questions to understand the full situation before responding",
                "Bring together the right teams to handle communication and response",
                "Think through the possible causes and long-term lessons",
                "Make a quick decision to contain the issue and reassure others",
            ],
        },
        Question {
            prompt: "An unfamiliar organization emails you asking for partnership details and \
                     financial information. You…",
            options: [
                "Verify the source and confirm if it's legitimate before replying",
                "Notify your communications or compliance team for review",
                "Reflect on how similar requests have been handled in the past",
                "Choose not to respond and move on quickly",
            ],
        },
        Question {
            prompt: "A staff member reports receiving a suspicious email claiming to be from \
                     your office. How do you handle it?",
            options: [
                "Ask for more details to understand what happened",
                "Appreciate the report and encourage others to do the same",
                "Think about what this incident says about awareness in the team",
                "Tell them to delete it immediately and stay alert",
            ],
        },
        Question {
            prompt: "You're preparing for a management meeting on cybersecurity awareness. \
                     Your approach is to…",
            options: [
                "Review real examples to ask thoughtful questions",
                "Encourage open discussion and teamwork on the topic",
                "Focus on what can be improved in current practices",
                "Keep it brief and practical with clear next steps",
            ],
        },
    ],
    personas: [
        Persona {
            title: "The Thoughtful Leader 🕵️",
            description: "You take time to understand before acting. Calm, analytical, and \
                          trusted for your balanced judgment.",
            tips: &[
                "Continue asking thoughtful questions before taking action — your calm approach \
                 builds confidence during pressure.",
                "Balance careful thinking with timely decisions to keep momentum when it matters most.",
            ],
        },
        Persona {
            title: "The Collaborator 🛡",
            description: "You believe in teamwork and open communication. You build confidence \
                          by keeping everyone informed and involved.",
            tips: &[
                "Keep encouraging your teams to share information — it builds a culture of \
                 transparency and trust.",
                "Recognize and reward people who report issues early; that openness strengthens \
                 the whole organization.",
            ],
        },
        Persona {
            title: "The Visionary ♟",
            description: "You focus on lessons and long-term improvement. You see patterns others \
                          miss and guide the organization toward growth.",
            tips: &[
                "Share insights from past challenges to help others see the bigger picture.",
                "Encourage proactive learning — your forward-thinking mindset shapes better \
                 decisions at every level.",
            ],
        },
        Persona {
            title: "The Decisive Driver 🚀",
            description: "You act quickly and confidently in moments of uncertainty. You inspire \
                          others through clear direction and momentum.",
            tips: &[
                "Your decisiveness is a strength — pair it with reflection afterward to capture \
                 key lessons.",
                "Model clear communication when making fast calls so others stay aligned and confident.",
            ],
        },
    ],
    tips_heading: "Practical tips for leaders like you:",
    greeting_fallback: "Leader",
    persona_label: "Cyber Leadership Persona",
    status_notice: "⚠️ Could not reach Google Sheet. Saving locally.",
    webhook_url: "https://script.google.com/macros/s/AKfycbzTZmYJbaGx4oYEo4eXOK5_2IFZMHdd8zE8B9Qbajqc9ibv1b7-7Lr0X1RJkbp7QbYs/exec",
};

static AWARENESS: Quiz = Quiz {
    variant: QuizVariant::Awareness,
    title: "VisionFund MFI — Cyber Persona Quiz",
    subtitle: "Quiz Questions",
    intro: None,
    questions: &[
        Question {
            prompt: "You get a Teams call from \"IT Support\" telling you your account is \
                     compromised and you must log in right now using the link they send. You…",
            options: [
                "Ask questions and dig deeper before acting",
                "Calmly follow procedure and notify the right people",
                "Try to trick the scammer into revealing their intent",
                "Immediately disconnect, block, and move on",
            ],
        },
        Question {
            prompt: "A 'supplier' emails you about an urgent unpaid invoice with a link to pay \
                     immediately. You…",
            options: [
                "Double-check payment records before acting",
                "Alert your team right away",
                "Investigate the email's metadata",
                "Delete it instantly and block the sender",
            ],
        },
        Question {
            prompt: "A text message claims to be from your bank with a fraud alert and a link \
                     to 'verify your account.' You…",
            options: [
                "Call the bank directly using the number on your card",
                "Take a screenshot and report it",
                "Search online for the scam wording",
                "Delete and block instantly",
            ],
        },
        Question {
            prompt: "It's April, six months after Cybersecurity Awareness Month, and you see an \
                     email that feels suspicious. You…",
            options: [
                "Investigate thoroughly before acting",
                "Share a warning with your team",
                "Archive it and track similar attempts",
                "Delete it and move on",
            ],
        },
    ],
    personas: [
        Persona {
            title: "The Detective 🕵️",
            description: "You question and verify before acting. Strong investigator and \
                          cautious by nature.",
            tips: &[
                "Keep verifying sources and encourage others to question suspicious requests.",
                "Share tips on investigating messages.",
            ],
        },
        Persona {
            title: "The Guardian 🛡",
            description: "You protect others by reporting and coordinating. Team-focused and \
                          dependable.",
            tips: &[
                "Keep reporting and be a role model for your team.",
                "Help colleagues know how to escalate suspicious items.",
            ],
        },
        Persona {
            title: "The Strategist ♟",
            description: "You think like an attacker to anticipate threats. Analytical and \
                          proactive.",
            tips: &[
                "Use your analytical skills to improve team defenses.",
                "Share patterns you observe in phishing attempts.",
            ],
        },
        Persona {
            title: "The Scout 🚀",
            description: "You act quickly to neutralize threats. Fast responder who values \
                          immediate action.",
            tips: &[
                "Balance quick action with verification to avoid accidental disruption.",
                "Document incidents to help the team learn.",
            ],
        },
    ],
    tips_heading: "Practical tips:",
    greeting_fallback: "Participant",
    persona_label: "primary Cyber Persona",
    status_notice: "⚠️ Submitted, but could not reach the central database. Saving locally.",
    webhook_url: "https://script.google.com/macros/s/AKfycbzeJ_rRRqHnhGlSee4ZEH3PMVA2Q5KZi5KfeDbog18m0pok7ISjB8Q4YxesbhTM_YWD/exec",
};
