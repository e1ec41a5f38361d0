//! Submission sink: one webhook attempt, then the local log.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, info_span, warn, Instrument};

use crate::config::QuizConfig;
use crate::error::{Error, Result, TransportFailure};

use super::log::ResponseLog;
use super::record::SubmissionRecord;
use super::transport::{SubmissionTransport, WebhookTransport};

/// Where a submission ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The webhook answered 200
    Delivered { endpoint: String },
    /// Appended to the local log instead
    SavedLocally { path: PathBuf, reason: FallbackReason },
}

/// Why the local log was used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Remote submission switched off in configuration
    WebhookDisabled,
    /// The single delivery attempt failed
    DeliveryFailed(TransportFailure),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::WebhookDisabled => write!(f, "webhook disabled"),
            FallbackReason::DeliveryFailed(failure) => write!(f, "{}", failure),
        }
    }
}

pub struct SubmissionSink {
    transport: Option<Box<dyn SubmissionTransport>>,
    log: ResponseLog,
}

impl SubmissionSink {
    /// `transport: None` means every submission goes straight to the log
    pub fn new(transport: Option<Box<dyn SubmissionTransport>>, log: ResponseLog) -> Self {
        Self { transport, log }
    }

    pub fn from_config(config: &QuizConfig) -> Result<Self> {
        let transport: Option<Box<dyn SubmissionTransport>> = if config.webhook.enabled {
            Some(Box::new(WebhookTransport::new(
                config.webhook_url(),
                config.webhook_timeout(),
            )?))
        } else {
            None
        };

        Ok(Self::new(transport, ResponseLog::new(config.responses_file())))
    }

    /// Deliver remotely or fall back to the local log.
    ///
    /// Transport failures are absorbed; only a failed local append is returned
    /// as an error.
    pub async fn submit(&self, record: &SubmissionRecord) -> Result<SubmissionOutcome> {
        self.deliver_or_save(record)
            .instrument(info_span!("submission", id = %record.id))
            .await
    }

    async fn deliver_or_save(&self, record: &SubmissionRecord) -> Result<SubmissionOutcome> {
        let reason = match self.transport {
            None => FallbackReason::WebhookDisabled,
            Some(ref transport) => match transport.deliver(&record.to_payload()).await {
                Ok(()) => {
                    info!(endpoint = %transport.endpoint(), "Submission delivered to webhook");
                    return Ok(SubmissionOutcome::Delivered {
                        endpoint: transport.endpoint().to_string(),
                    });
                }
                Err(e) => {
                    warn!(error = %e.format_for_log(), "Webhook submission failed, saving locally");
                    let failure = e
                        .transport_failure()
                        .cloned()
                        .unwrap_or_else(|| TransportFailure::Unreachable(e.to_string()));
                    FallbackReason::DeliveryFailed(failure)
                }
            },
        };

        self.log.append(record)?;
        Ok(SubmissionOutcome::SavedLocally {
            path: self.log.path().to_path_buf(),
            reason,
        })
    }

    /// `submit` on a throwaway current-thread runtime
    pub fn submit_blocking(&self, record: &SubmissionRecord) -> Result<SubmissionOutcome> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create runtime: {}", e)))?;

        runtime.block_on(self.submit(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Letter::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Answers every delivery with a fixed result and remembers the payloads
    struct FakeTransport {
        status: Option<u16>,
        calls: Arc<Mutex<Vec<Value>>>,
    }

    #[async_trait]
    impl SubmissionTransport for FakeTransport {
        fn endpoint(&self) -> &str {
            "https://hooks.test/exec"
        }

        async fn deliver(&self, payload: &Value) -> Result<()> {
            self.calls.lock().push(payload.clone());
            match self.status {
                Some(200) => Ok(()),
                Some(code) => Err(Error::transport(self.endpoint(), TransportFailure::Status(code))),
                None => Err(Error::transport(
                    self.endpoint(),
                    TransportFailure::Unreachable("connection refused".into()),
                )),
            }
        }
    }

    fn sink_with(status: Option<u16>, dir: &TempDir) -> (SubmissionSink, Arc<Mutex<Vec<Value>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let transport = FakeTransport {
            status,
            calls: Arc::clone(&calls),
        };
        let log = ResponseLog::new(dir.path().join("responses.csv"));
        (SubmissionSink::new(Some(Box::new(transport)), log), calls)
    }

    fn rows(sink: &SubmissionSink) -> usize {
        let raw = sink.log.read_raw().unwrap().unwrap_or_default();
        sink.log.count_records(&raw).unwrap()
    }

    fn record() -> SubmissionRecord {
        SubmissionRecord::new(None, Some("Ops".into()), vec![B, B, B, A], "The Collaborator 🛡")
    }

    #[test]
    fn test_delivered_writes_nothing_locally() {
        let dir = TempDir::new().unwrap();
        let (sink, calls) = sink_with(Some(200), &dir);

        let outcome = tokio_test::block_on(sink.submit(&record())).unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Delivered {
                endpoint: "https://hooks.test/exec".to_string()
            }
        );
        assert_eq!(calls.lock().len(), 1);
        assert!(sink.log.read_raw().unwrap().is_none());
    }

    #[test]
    fn test_non_200_falls_back_with_one_row() {
        let dir = TempDir::new().unwrap();
        let (sink, calls) = sink_with(Some(503), &dir);

        let outcome = tokio_test::block_on(sink.submit(&record())).unwrap();

        match outcome {
            SubmissionOutcome::SavedLocally { reason, path } => {
                assert_eq!(path, dir.path().join("responses.csv"));
                assert_eq!(reason, FallbackReason::DeliveryFailed(TransportFailure::Status(503)));
                assert!(reason.to_string().contains("503"));
            }
            other => panic!("expected local fallback, got {:?}", other),
        }
        assert_eq!(calls.lock().len(), 1);
        assert_eq!(rows(&sink), 1);

        let raw = String::from_utf8(sink.log.read_raw().unwrap().unwrap()).unwrap();
        let rows: Vec<&str> = raw.lines().collect();
        assert_eq!(rows[0], "timestamp,name,department,q1,q2,q3,q4,persona");
        assert!(rows[1].ends_with(",,Ops,B,B,B,A,The Collaborator 🛡"));
    }

    #[test]
    fn test_transport_error_falls_back_without_retry() {
        let dir = TempDir::new().unwrap();
        let (sink, calls) = sink_with(None, &dir);

        for _ in 0..3 {
            let outcome = tokio_test::block_on(sink.submit(&record())).unwrap();
            assert!(matches!(
                outcome,
                SubmissionOutcome::SavedLocally {
                    reason: FallbackReason::DeliveryFailed(TransportFailure::Unreachable(_)),
                    ..
                }
            ));
        }

        // one attempt per submission
        assert_eq!(calls.lock().len(), 3);
        assert_eq!(rows(&sink), 3);
    }

    #[test]
    fn test_disabled_webhook_goes_straight_to_log() {
        let dir = TempDir::new().unwrap();
        let sink = SubmissionSink::new(None, ResponseLog::new(dir.path().join("r.csv")));

        let outcome = sink.submit_blocking(&record()).unwrap();
        assert!(matches!(
            outcome,
            SubmissionOutcome::SavedLocally { reason: FallbackReason::WebhookDisabled, .. }
        ));
        assert_eq!(rows(&sink), 1);
    }

    #[test]
    fn test_fallback_write_failure_surfaces() {
        let dir = TempDir::new().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let transport = FakeTransport { status: Some(500), calls };
        // the log path is an existing directory, so the append cannot succeed
        let sink = SubmissionSink::new(Some(Box::new(transport)), ResponseLog::new(dir.path()));

        let err = tokio_test::block_on(sink.submit(&record())).unwrap_err();
        assert!(matches!(err, Error::LocalStorage { .. }));
    }

    #[test]
    fn test_payload_sent_matches_record() {
        let dir = TempDir::new().unwrap();
        let (sink, calls) = sink_with(Some(200), &dir);

        tokio_test::block_on(sink.submit(&record())).unwrap();

        let sent = calls.lock()[0].clone();
        assert_eq!(sent["name"], "");
        assert_eq!(sent["department"], "Ops");
        assert_eq!(sent["q3"], "B");
        assert_eq!(sent["persona"], "The Collaborator 🛡");
    }
}
