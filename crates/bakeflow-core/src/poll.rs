//! Terminal-state waiter
//!
//! The control plane acknowledges mutating calls immediately and moves
//! the resource through provider-defined states in the background. The
//! [`Poller`] re-reads the resource until it settles: the caller's
//! `fetch` closure reads the current state and classifies it into an
//! [`Observation`]. Classification vocabularies differ per resource
//! kind (instances report `ACTIVE`/`ERROR`, images report
//! `active`/`killed`/`deleted`), so classification lives with the
//! workflow, not here.

use crate::error::{CoreError, Result};
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Classified result of one status fetch.
#[derive(Debug, Clone)]
pub enum Observation<T> {
    /// Terminal success, carrying the extracted output.
    Ready(T),
    /// Terminal failure, carrying the offending provider state.
    Failed { state: String },
    /// Not terminal yet.
    Pending { state: String },
}

/// Waits for a resource to reach a terminal state.
///
/// Every wait resolves in exactly one of three ways: `Ok` with the
/// extracted output, [`CoreError::FailedState`], or
/// [`CoreError::Timeout`]. It never returns while the resource is
/// still pending.
#[derive(Debug, Clone)]
pub struct Poller {
    subject: String,
    interval: Duration,
    timeout: Duration,
}

impl Poller {
    /// `subject` names the awaited resource in logs and errors.
    pub fn new(subject: impl Into<String>, interval: Duration, timeout: Duration) -> Self {
        Self {
            subject: subject.into(),
            interval,
            timeout,
        }
    }

    /// Poll `fetch` until it reports a terminal observation or the
    /// deadline passes.
    ///
    /// A `fetch` that resolves to `Err` is treated as pending, not as
    /// failure: list/read endpoints may lag behind the mutating call
    /// that created the resource (eventual-consistency window). Such
    /// errors are bounded only by the deadline.
    pub async fn wait_for<T, E, F, Fut>(&self, mut fetch: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<Observation<T>, E>>,
        E: Display,
    {
        let start = Instant::now();
        let deadline = start + self.timeout;

        loop {
            match fetch().await {
                Ok(Observation::Ready(value)) => return Ok(value),
                Ok(Observation::Failed { state }) => {
                    return Err(CoreError::FailedState(state));
                }
                Ok(Observation::Pending { state }) => {
                    tracing::debug!(subject = %self.subject, %state, "still pending");
                }
                Err(e) => {
                    tracing::debug!(
                        subject = %self.subject,
                        error = %e,
                        "fetch failed, treating as pending"
                    );
                }
            }

            if Instant::now() >= deadline {
                return Err(CoreError::Timeout {
                    subject: self.subject.clone(),
                    waited_secs: start.elapsed().as_secs(),
                });
            }
            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;

    fn quick_poller() -> Poller {
        Poller::new(
            "test resource",
            Duration::from_millis(5),
            Duration::from_millis(40),
        )
    }

    #[tokio::test]
    async fn ready_on_first_fetch_returns_without_sleeping() {
        let calls = Cell::new(0u32);
        let calls = &calls;
        let poller = Poller::new(
            "test resource",
            Duration::from_millis(500),
            Duration::from_secs(5),
        );

        let started = Instant::now();
        let value = poller
            .wait_for(move || async move {
                calls.set(calls.get() + 1);
                Ok::<_, Infallible>(Observation::Ready(42))
            })
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(calls.get(), 1);
        // No sleep happened: well under one interval.
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn failed_state_is_reported_and_nothing_is_extracted() {
        let result = quick_poller()
            .wait_for(|| async {
                Ok::<Observation<u32>, Infallible>(Observation::Failed {
                    state: "ERROR".to_string(),
                })
            })
            .await;

        match result {
            Err(CoreError::FailedState(state)) => assert_eq!(state, "ERROR"),
            other => panic!("expected FailedState, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pending_forever_times_out_and_never_early() {
        let started = Instant::now();
        let result = quick_poller()
            .wait_for(|| async {
                Ok::<Observation<u32>, Infallible>(Observation::Pending {
                    state: "BUILD".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(CoreError::Timeout { .. })));
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn fetch_error_counts_as_pending() {
        let calls = Cell::new(0u32);
        let calls = &calls;

        let value = quick_poller()
            .wait_for(move || async move {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    Err("list endpoint not caught up")
                } else {
                    Ok(Observation::Ready("done"))
                }
            })
            .await
            .unwrap();

        assert_eq!(value, "done");
        assert_eq!(calls.get(), 2);
    }
}
