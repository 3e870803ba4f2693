//! Registration status poller
//!
//! Repeatedly queries the registration status endpoint until a terminal
//! status is observed or the budget runs out, then reports the last state.
//! Every smoke flow that waits on an application shares this one routine.

use std::time::Duration;

use amani_core::domain::registration::{PollState, RegistrationStatus};
use amani_core::extract;
use async_trait::async_trait;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::{ApiResponse, PortalClient};

/// Source of registration status responses
///
/// Trait-based so the poll loop can be exercised against scripted
/// responses; [`PortalClient`] is the HTTP implementation.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches the current status payload for a registration
    async fn fetch_status(&self, registration_id: &str) -> Result<ApiResponse>;
}

#[async_trait]
impl StatusSource for PortalClient {
    async fn fetch_status(&self, registration_id: &str) -> Result<ApiResponse> {
        self.registration_status(registration_id).await
    }
}

/// Polling budget: total wall-clock time or a fixed number of attempts
///
/// The two historical smoke flows used one strategy each; both are
/// supported and mutually substitutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollBudget {
    /// Keep polling until this much time has elapsed
    Deadline(Duration),
    /// Keep polling for at most this many attempts
    Attempts(u32),
}

impl PollBudget {
    /// Whether the budget does not cover even one attempt
    pub fn is_empty(self) -> bool {
        match self {
            Self::Deadline(total) => total.is_zero(),
            Self::Attempts(max) => max == 0,
        }
    }
}

/// Result of a poll run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Last observed state
    pub last: PollState,
    /// Whether a terminal status was observed
    pub terminal: bool,
    /// Number of attempts issued
    pub attempts: u32,
}

/// Polls a registration until approval, rejection, or budget exhaustion
///
/// The interval is fixed; there is no backoff. A transport failure on a
/// single attempt is a transient miss and the loop continues. Exhausting
/// the budget is a normal, non-terminal outcome, not an error.
#[derive(Debug)]
pub struct RegistrationPoller<S> {
    source: S,
    interval: Duration,
    budget: PollBudget,
}

impl<S: StatusSource> RegistrationPoller<S> {
    /// Creates a poller with a fixed interval and a budget
    ///
    /// # Errors
    /// `ZeroPollInterval` if the interval is zero, `EmptyPollBudget` if
    /// the budget allows no attempts.
    pub fn new(source: S, interval: Duration, budget: PollBudget) -> Result<Self> {
        if interval.is_zero() {
            return Err(ClientError::ZeroPollInterval);
        }
        if budget.is_empty() {
            return Err(ClientError::EmptyPollBudget);
        }

        Ok(Self {
            source,
            interval,
            budget,
        })
    }

    /// Runs the poll loop for one registration
    ///
    /// Each attempt fetches the status payload, classifies the label via
    /// the priority-ordered extraction, and halts on the first terminal
    /// status. The cooperative sleep between attempts only happens when the
    /// budget still covers another attempt, so the loop never sleeps past
    /// its budget.
    ///
    /// # Errors
    /// `MissingRegistrationId` if `registration_id` is empty.
    pub async fn run(&self, registration_id: &str) -> Result<PollOutcome> {
        if registration_id.is_empty() {
            return Err(ClientError::MissingRegistrationId);
        }

        info!(
            "Polling registration {} (interval: {:?}, budget: {:?})",
            registration_id, self.interval, self.budget
        );

        let deadline = match self.budget {
            PollBudget::Deadline(total) => Some(Instant::now() + total),
            PollBudget::Attempts(_) => None,
        };

        let mut last = PollState::default();
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            match self.source.fetch_status(registration_id).await {
                Ok(response) => {
                    let status = extract::status_label(&response.payload)
                        .as_deref()
                        .map(RegistrationStatus::classify)
                        .unwrap_or(RegistrationStatus::Unknown);

                    last = PollState {
                        status,
                        http_status: Some(response.status.as_u16()),
                    };

                    info!(
                        "Poll attempt {}: HTTP {} -> {}",
                        attempts, response.status, status
                    );
                    debug!("Poll attempt {} body: {}", attempts, response.payload);

                    if status.is_terminal() {
                        return Ok(PollOutcome {
                            last,
                            terminal: true,
                            attempts,
                        });
                    }
                }
                Err(e) => {
                    warn!("Poll attempt {} failed: {}", attempts, e);
                }
            }

            if !self.budget_allows_next(attempts, deadline) {
                return Ok(PollOutcome {
                    last,
                    terminal: false,
                    attempts,
                });
            }

            time::sleep(self.interval).await;
        }
    }

    /// Whether the budget still covers one more attempt after `attempts`
    fn budget_allows_next(&self, attempts: u32, deadline: Option<Instant>) -> bool {
        match self.budget {
            PollBudget::Attempts(max) => attempts < max,
            PollBudget::Deadline(_) => {
                deadline.is_some_and(|deadline| Instant::now() + self.interval < deadline)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amani_core::extract::Payload;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// Scripted status source: serves one canned step per fetch
    #[derive(Debug)]
    struct ScriptedSource {
        steps: Mutex<Vec<Step>>,
    }

    #[derive(Debug)]
    enum Step {
        Body(&'static str),
        TransportError,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                steps: Mutex::new(steps),
            }
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self, _registration_id: &str) -> Result<ApiResponse> {
            let step = self.steps.lock().unwrap().remove(0);
            match step {
                Step::Body(text) => Ok(ApiResponse {
                    status: StatusCode::OK,
                    content_type: Some("application/json".to_string()),
                    payload: Payload::parse(text),
                }),
                Step::TransportError => Err(transport_error().await),
            }
        }
    }

    /// Builds a real transport-level `ClientError` without touching the
    /// network: an empty host fails at request construction.
    async fn transport_error() -> ClientError {
        let err = reqwest::Client::new()
            .get("http://")
            .send()
            .await
            .expect_err("empty host must fail to build");
        ClientError::from(err)
    }

    fn poller(steps: Vec<Step>, budget: PollBudget) -> RegistrationPoller<ScriptedSource> {
        RegistrationPoller::new(
            ScriptedSource::new(steps),
            Duration::from_millis(1),
            budget,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_halts_on_each_terminal_status() {
        for body in [
            r#"{"status": "Approved"}"#,
            r#"{"status": "ACTIVE"}"#,
            r#"{"status": "rejected"}"#,
        ] {
            let poller = poller(vec![Step::Body(body)], PollBudget::Attempts(10));
            let outcome = poller.run("reg-1").await.unwrap();

            assert!(outcome.terminal);
            assert_eq!(outcome.attempts, 1);
            assert!(outcome.last.status.is_terminal());
        }
    }

    #[tokio::test]
    async fn test_pending_then_approved_stops_after_three_attempts() {
        let poller = poller(
            vec![
                Step::Body(r#"{"status": "Pending"}"#),
                Step::Body(r#"{"status": "Pending"}"#),
                Step::Body(r#"{"status": "Approved"}"#),
            ],
            PollBudget::Attempts(10),
        );

        let outcome = poller.run("abc123").await.unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.last.status, RegistrationStatus::Approved);
        assert_eq!(outcome.last.http_status, Some(200));
    }

    #[tokio::test]
    async fn test_non_terminal_exhausts_attempt_budget() {
        let steps = (0..5)
            .map(|_| Step::Body(r#"{"status": "Pending"}"#))
            .collect();
        let poller = poller(steps, PollBudget::Attempts(3));

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(!outcome.terminal);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.last.status, RegistrationStatus::Pending);
    }

    #[tokio::test]
    async fn test_raw_body_is_unknown_and_loop_continues() {
        let poller = poller(
            vec![
                Step::Body("<html>502 Bad Gateway</html>"),
                Step::Body(r#"{"status": "Approved"}"#),
            ],
            PollBudget::Attempts(5),
        );

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.attempts, 2);
    }

    #[tokio::test]
    async fn test_transport_miss_is_transient() {
        let poller = poller(
            vec![
                Step::TransportError,
                Step::Body(r#"{"status": "Approved"}"#),
            ],
            PollBudget::Attempts(5),
        );

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.last.http_status, Some(200));
    }

    #[tokio::test]
    async fn test_all_attempts_missed_reports_unknown() {
        let poller = poller(
            vec![Step::TransportError, Step::TransportError],
            PollBudget::Attempts(2),
        );

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(!outcome.terminal);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.last.status, RegistrationStatus::Unknown);
        assert_eq!(outcome.last.http_status, None);
    }

    #[tokio::test]
    async fn test_approved_flag_halts_the_loop() {
        let poller = poller(
            vec![Step::Body(r#"{"approved": true}"#)],
            PollBudget::Attempts(5),
        );

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.last.status, RegistrationStatus::Approved);
    }

    #[tokio::test]
    async fn test_deadline_budget_expires() {
        let steps = (0..50)
            .map(|_| Step::Body(r#"{"status": "Pending"}"#))
            .collect();
        let source = ScriptedSource::new(steps);
        let poller = RegistrationPoller::new(
            source,
            Duration::from_millis(5),
            PollBudget::Deadline(Duration::from_millis(25)),
        )
        .unwrap();

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(!outcome.terminal);
        assert!(outcome.attempts >= 1);
        assert!(outcome.attempts < 50);
    }

    #[tokio::test]
    async fn test_deadline_budget_still_halts_on_terminal() {
        let source = ScriptedSource::new(vec![
            Step::Body(r#"{"status": "Pending"}"#),
            Step::Body(r#"{"data": {"status": "Active"}}"#),
        ]);
        let poller = RegistrationPoller::new(
            source,
            Duration::from_millis(1),
            PollBudget::Deadline(Duration::from_secs(5)),
        )
        .unwrap();

        let outcome = poller.run("reg-1").await.unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.last.status, RegistrationStatus::Active);
    }

    #[tokio::test]
    async fn test_empty_registration_id_is_rejected() {
        let poller = poller(vec![], PollBudget::Attempts(1));

        let err = poller.run("").await.unwrap_err();
        assert!(matches!(err, ClientError::MissingRegistrationId));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let err = RegistrationPoller::new(
            ScriptedSource::new(vec![]),
            Duration::ZERO,
            PollBudget::Attempts(1),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::ZeroPollInterval));
    }

    #[test]
    fn test_empty_budget_is_rejected() {
        let err = RegistrationPoller::new(
            ScriptedSource::new(vec![]),
            Duration::from_millis(1),
            PollBudget::Attempts(0),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::EmptyPollBudget));

        let err = RegistrationPoller::new(
            ScriptedSource::new(vec![]),
            Duration::from_millis(1),
            PollBudget::Deadline(Duration::ZERO),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::EmptyPollBudget));
    }
}
