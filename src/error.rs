//! Error types for persona-quiz
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly hints
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for quiz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // Local storage errors (2xx)
    StorageWrite = 200,
    StorageRead = 201,
    IoError = 202,

    // Submission transport errors (3xx)
    TransportUnreachable = 300,
    TransportTimeout = 301,
    TransportStatus = 302,

    // Answer input errors (4xx)
    InvalidAnswer = 400,
    EmptyResponse = 401,
    AnswerCountMismatch = 402,
    UnknownVariant = 403,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // Storage errors
            300..=399 => 30, // Transport errors
            400..=499 => 40, // Input errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a webhook submission did not count as delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// Connection refused, DNS failure, TLS failure and the like
    Unreachable(String),
    /// No definitive answer within the configured timeout
    Timeout { timeout_ms: u64 },
    /// The endpoint answered with something other than 200
    Status(u16),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Unreachable(message) => write!(f, "unreachable ({})", message),
            TransportFailure::Timeout { timeout_ms } => {
                write!(f, "timed out after {}ms", timeout_ms)
            }
            TransportFailure::Status(status) => write!(f, "responded with HTTP {}", status),
        }
    }
}

/// Which side of the response log an I/O failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAction {
    Append,
    Read,
}

impl fmt::Display for StorageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageAction::Append => write!(f, "append to"),
            StorageAction::Read => write!(f, "read"),
        }
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // Local Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// Fallback append or export read-back failed
    #[error("Failed to {action} response log {path}")]
    LocalStorage {
        path: PathBuf,
        action: StorageAction,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Submission Errors
    // ─────────────────────────────────────────────────────────────

    /// Webhook could not take the submission
    #[error("Webhook {url} {failure}")]
    SubmissionTransport { url: String, failure: TransportFailure },

    // ─────────────────────────────────────────────────────────────
    // Answer Errors
    // ─────────────────────────────────────────────────────────────

    /// Answer letter outside A-D
    #[error("Invalid answer '{input}': expected one of A, B, C, D")]
    InvalidAnswer { input: String },

    /// No answers at all
    #[error("Cannot score an empty response")]
    EmptyResponse,

    /// Response length differs from the question count
    #[error("Expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    /// Unknown quiz variant name
    #[error("Unknown quiz variant '{name}'. Valid: leadership, awareness")]
    UnknownVariant { name: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::LocalStorage { action, .. } => match action {
                StorageAction::Append => ErrorCode::StorageWrite,
                StorageAction::Read => ErrorCode::StorageRead,
            },
            Error::Io(_) => ErrorCode::IoError,
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::SubmissionTransport { failure, .. } => match failure {
                TransportFailure::Unreachable(_) => ErrorCode::TransportUnreachable,
                TransportFailure::Timeout { .. } => ErrorCode::TransportTimeout,
                TransportFailure::Status(_) => ErrorCode::TransportStatus,
            },

            Error::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            Error::EmptyResponse => ErrorCode::EmptyResponse,
            Error::AnswerCountMismatch { .. } => ErrorCode::AnswerCountMismatch,
            Error::UnknownVariant { .. } => ErrorCode::UnknownVariant,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// The delivery failure behind a transport error
    pub fn transport_failure(&self) -> Option<&TransportFailure> {
        match self {
            Error::SubmissionTransport { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'persona-quiz config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'persona-quiz config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::LocalStorage { action: StorageAction::Append, .. } => Some(
                "Check that the responses file directory exists and is writable, or set 'storage.responses_file'."
            ),
            Error::LocalStorage { action: StorageAction::Read, .. } => Some(
                "Check the permissions of the responses file."
            ),
            Error::SubmissionTransport { .. } => Some(
                "Check your network connection and the webhook URL. Responses are kept locally meanwhile."
            ),
            Error::InvalidAnswer { .. } | Error::AnswerCountMismatch { .. } => Some(
                "Answer every question with a single letter, e.g. --answers A,B,C,D."
            ),
            Error::UnknownVariant { .. } => Some(
                "Run 'persona-quiz questions --variant leadership' or '--variant awareness'."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            self.code().as_str(),
            self
        );

        if let Some(source) = std::error::Error::source(self) {
            output.push_str(&format!("  caused by: {}\n", source));
        }

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(message: impl Into<String>, source: toml::de::Error) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn storage(
        action: StorageAction,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::LocalStorage {
            path: path.into(),
            action,
            source,
        }
    }

    pub fn transport(url: impl Into<String>, failure: TransportFailure) -> Self {
        Error::SubmissionTransport {
            url: url.into(),
            failure,
        }
    }

    pub fn invalid_answer(input: impl Into<String>) -> Self {
        Error::InvalidAnswer {
            input: input.into(),
        }
    }
}
