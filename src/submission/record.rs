//! The record written for every completed quiz.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::quiz::Letter;

/// One completed submission. Never mutated once created.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    /// Correlates log lines for this submission; not persisted
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub answers: Vec<Letter>,
    pub persona: String,
}

impl SubmissionRecord {
    pub fn new(
        name: Option<String>,
        department: Option<String>,
        answers: Vec<Letter>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            name: non_blank(name),
            department: non_blank(department),
            answers,
            persona: persona.into(),
        }
    }

    /// Column names: timestamp, name, department, q1..qN, persona
    pub fn header(question_count: usize) -> Vec<String> {
        let mut header = vec![
            "timestamp".to_string(),
            "name".to_string(),
            "department".to_string(),
        ];
        header.extend((1..=question_count).map(|i| format!("q{}", i)));
        header.push("persona".to_string());
        header
    }

    /// Field values in `header` order
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.timestamp_iso(),
            self.name.clone().unwrap_or_default(),
            self.department.clone().unwrap_or_default(),
        ];
        row.extend(self.answers.iter().map(Letter::to_string));
        row.push(self.persona.clone());
        row
    }

    /// Webhook body: name, department, q1..qN, persona
    pub fn to_payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".into(), Value::from(self.name.clone().unwrap_or_default()));
        body.insert(
            "department".into(),
            Value::from(self.department.clone().unwrap_or_default()),
        );
        for (i, letter) in self.answers.iter().enumerate() {
            body.insert(format!("q{}", i + 1), Value::from(letter.to_string()));
        }
        body.insert("persona".into(), Value::from(self.persona.clone()));
        Value::Object(body)
    }

    /// UTC ISO-8601 with microseconds, e.g. 2025-10-01T09:30:00.123456Z
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
