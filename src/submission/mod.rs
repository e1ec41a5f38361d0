//! Recording completed quizzes.
//!
//! A submission is posted once to the sheet webhook. If that attempt fails for
//! any reason the record is appended to a local CSV log instead, which can be
//! exported verbatim later.

pub mod log;
pub mod record;
pub mod sink;
pub mod transport;

pub use log::ResponseLog;
pub use record::SubmissionRecord;
pub use sink::{FallbackReason, SubmissionOutcome, SubmissionSink};
