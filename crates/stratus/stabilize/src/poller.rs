//! Single-step re-entrant operation poller
//!
//! One invocation, one status check. The poller never sleeps: a pending
//! verdict carries the delay the caller should wait before re-invoking,
//! and all state needed across invocations lives in the serializable
//! [`PollState`] the caller persists.

use crate::backoff::BackoffSchedule;
use crate::client::{ControlPlane, SubmitError};
use crate::error::{Result, StabilizeError};
use crate::status::{classify, StatusClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stratus_types::{OperationHandle, OperationId, OperationKind, PlacementGroup, TargetGroupId};
use tracing::{debug, info, warn};

/// Bookkeeping for one in-flight operation, carried by the caller
/// between invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollState {
    /// The operation being stabilized
    pub handle: OperationHandle,

    /// Number of status checks completed so far
    pub polls: u32,

    /// When the operation was first submitted; the deadline is measured
    /// from here
    pub started_at: DateTime<Utc>,
}

impl PollState {
    pub fn new(handle: OperationHandle) -> Self {
        Self {
            handle,
            polls: 0,
            started_at: Utc::now(),
        }
    }
}

/// Bookkeeping for one submission attempt, carried by the caller while
/// busy collisions are being absorbed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitState {
    /// Busy collisions seen so far for this submission
    pub attempts: u32,

    /// When the first attempt was made; the deadline is measured from
    /// here
    pub started_at: DateTime<Utc>,
}

impl SubmitState {
    pub fn new() -> Self {
        Self {
            attempts: 0,
            started_at: Utc::now(),
        }
    }
}

impl Default for SubmitState {
    fn default() -> Self {
        Self::new()
    }
}

/// Verdict of a single poll step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The operation reached its successful terminal state
    Complete,

    /// Still in flight; suspend and re-invoke after the given delay
    Pending { retry_after: Duration },
}

/// Verdict of a single submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The control plane accepted the batch; poll the returned state
    Accepted(PollState),

    /// Collided with a concurrent operation on the same group; resubmit
    /// after the given delay
    Busy { retry_after: Duration },
}

/// Drives one operation from submission to a terminal state
#[derive(Debug, Clone, Default)]
pub struct OperationPoller {
    schedule: BackoffSchedule,
}

impl OperationPoller {
    pub fn new(schedule: BackoffSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &BackoffSchedule {
        &self.schedule
    }

    /// Submit one batch, classifying the retry decision once per attempt.
    ///
    /// Only the in-progress collision is retryable; any other rejection
    /// propagates as fatal. Busy collisions are paced by the backoff
    /// schedule and bounded by its deadline, measured from the first
    /// attempt recorded in `state`: a permanently busy group times out
    /// instead of resubmitting forever.
    pub async fn submit(
        &self,
        client: &dyn ControlPlane,
        kind: OperationKind,
        group: &TargetGroupId,
        batch: &PlacementGroup,
        state: &mut SubmitState,
    ) -> Result<SubmitOutcome> {
        match client.submit(kind, group, batch).await {
            Ok(operation) => {
                info!(
                    group = %group,
                    operation = %operation,
                    kind = %kind,
                    placements = batch.placement_count(),
                    "batch submission initiated"
                );
                Ok(SubmitOutcome::Accepted(PollState::new(
                    OperationHandle::new(operation, group.clone()),
                )))
            }
            Err(SubmitError::Busy(colliding)) => {
                if self.schedule.deadline_exceeded(state.started_at, Utc::now()) {
                    warn!(group = %colliding, "submission deadline exceeded");
                    return Err(StabilizeError::SubmitTimeout {
                        group: colliding,
                        timeout: self.schedule.timeout,
                    });
                }
                let retry_after = self.schedule.delay_for(state.attempts);
                state.attempts += 1;
                warn!(
                    group = %colliding,
                    attempts = state.attempts,
                    delay_secs = retry_after.as_secs(),
                    "operation already in progress, will resubmit"
                );
                Ok(SubmitOutcome::Busy { retry_after })
            }
            Err(fatal) => Err(StabilizeError::Submit(fatal)),
        }
    }

    /// Perform exactly one status check against the control plane.
    ///
    /// Pending verdicts include the backoff delay for the next check; the
    /// deadline is enforced here, reported as a timeout distinct from any
    /// remote-reported failure.
    pub async fn poll_once(
        &self,
        client: &dyn ControlPlane,
        state: &mut PollState,
    ) -> Result<PollOutcome> {
        let status = client
            .operation_status(&state.handle.group, &state.handle.operation)
            .await?;

        match classify(status, &state.handle.operation)? {
            StatusClass::Done => Ok(PollOutcome::Complete),
            StatusClass::Pending => {
                if self.schedule.deadline_exceeded(state.started_at, Utc::now()) {
                    return Err(self.timeout(&state.handle.operation));
                }
                let retry_after = self.schedule.delay_for(state.polls);
                state.polls += 1;
                debug!(
                    operation = %state.handle.operation,
                    polls = state.polls,
                    delay_secs = retry_after.as_secs(),
                    "operation still in flight"
                );
                Ok(PollOutcome::Pending { retry_after })
            }
        }
    }

    fn timeout(&self, operation: &OperationId) -> StabilizeError {
        warn!(operation = %operation, "stabilization deadline exceeded");
        StabilizeError::Timeout {
            operation: operation.clone(),
            timeout: self.schedule.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GroupState, TargetGroupDescription};
    use crate::error::ClientError;
    use crate::status::OperationStatus;
    use async_trait::async_trait;
    use chrono::TimeDelta;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use stratus_types::{RegionId, TargetId};

    /// Mock control plane replaying scripted submission and status
    /// outcomes.
    struct ScriptedClient {
        submissions: Mutex<VecDeque<std::result::Result<OperationId, SubmitError>>>,
        statuses: Mutex<VecDeque<OperationStatus>>,
    }

    impl ScriptedClient {
        fn new(
            submissions: Vec<std::result::Result<OperationId, SubmitError>>,
            statuses: Vec<OperationStatus>,
        ) -> Self {
            Self {
                submissions: Mutex::new(submissions.into()),
                statuses: Mutex::new(statuses.into()),
            }
        }
    }

    #[async_trait]
    impl ControlPlane for ScriptedClient {
        async fn submit(
            &self,
            _kind: OperationKind,
            _group: &TargetGroupId,
            _batch: &PlacementGroup,
        ) -> std::result::Result<OperationId, SubmitError> {
            self.submissions
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected submission")
        }

        async fn operation_status(
            &self,
            _group: &TargetGroupId,
            _operation: &OperationId,
        ) -> std::result::Result<OperationStatus, ClientError> {
            Ok(self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected status poll"))
        }

        async fn describe_group(
            &self,
            group: &TargetGroupId,
        ) -> std::result::Result<TargetGroupDescription, ClientError> {
            Ok(TargetGroupDescription {
                group: group.clone(),
                state: GroupState::Active,
            })
        }
    }

    fn batch() -> PlacementGroup {
        PlacementGroup::new(
            [RegionId::new("eu-west-1")],
            [TargetId::new("acct-a")],
            vec![],
        )
    }

    fn group() -> TargetGroupId {
        TargetGroupId::new("fleet-1")
    }

    #[tokio::test]
    async fn test_poll_until_complete_with_backoff() {
        let client = ScriptedClient::new(
            vec![Ok(OperationId::new("op-1"))],
            vec![
                OperationStatus::Queued,
                OperationStatus::Running,
                OperationStatus::Running,
                OperationStatus::Succeeded,
            ],
        );
        let poller = OperationPoller::default();

        let outcome = poller
            .submit(
                &client,
                OperationKind::Create,
                &group(),
                &batch(),
                &mut SubmitState::new(),
            )
            .await
            .unwrap();
        let SubmitOutcome::Accepted(mut state) = outcome else {
            panic!("expected acceptance");
        };

        let mut delays = Vec::new();
        loop {
            match poller.poll_once(&client, &mut state).await.unwrap() {
                PollOutcome::Complete => break,
                PollOutcome::Pending { retry_after } => delays.push(retry_after.as_secs()),
            }
        }
        // Doubles on every 2nd poll: 2, 2, 4.
        assert_eq!(delays, vec![2, 2, 4]);
        assert_eq!(state.polls, 3);
    }

    #[tokio::test]
    async fn test_stopped_operation_is_fatal() {
        let client = ScriptedClient::new(vec![], vec![OperationStatus::Stopped]);
        let poller = OperationPoller::default();
        let mut state = PollState::new(OperationHandle::new(OperationId::new("op-2"), group()));

        let err = poller.poll_once(&client, &mut state).await.unwrap_err();
        assert!(matches!(err, StabilizeError::UnexpectedStatus { .. }));
    }

    #[tokio::test]
    async fn test_deadline_timeout_is_distinct_from_failure() {
        let client = ScriptedClient::new(vec![], vec![OperationStatus::Running]);
        let poller = OperationPoller::default();
        let mut state = PollState::new(OperationHandle::new(OperationId::new("op-3"), group()));
        state.started_at = Utc::now() - TimeDelta::hours(25);

        let err = poller.poll_once(&client, &mut state).await.unwrap_err();
        assert!(matches!(err, StabilizeError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_busy_submission_is_retryable() {
        let client = ScriptedClient::new(
            vec![
                Err(SubmitError::Busy(group())),
                Ok(OperationId::new("op-4")),
            ],
            vec![],
        );
        let poller = OperationPoller::default();
        let mut state = SubmitState::new();

        let first = poller
            .submit(&client, OperationKind::Delete, &group(), &batch(), &mut state)
            .await
            .unwrap();
        assert!(matches!(first, SubmitOutcome::Busy { .. }));
        assert_eq!(state.attempts, 1);

        let second = poller
            .submit(&client, OperationKind::Delete, &group(), &batch(), &mut state)
            .await
            .unwrap();
        assert!(matches!(second, SubmitOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn test_permanently_busy_group_times_out() {
        // A group that never frees up must hit the deadline, not
        // resubmit forever.
        let client = ScriptedClient::new(
            vec![Err(SubmitError::Busy(group()))],
            vec![],
        );
        let poller = OperationPoller::default();
        let mut state = SubmitState::new();
        state.started_at = Utc::now() - TimeDelta::hours(25);

        let err = poller
            .submit(&client, OperationKind::Create, &group(), &batch(), &mut state)
            .await
            .unwrap_err();
        assert!(matches!(err, StabilizeError::SubmitTimeout { .. }));
    }

    #[tokio::test]
    async fn test_rejected_submission_is_fatal() {
        let client = ScriptedClient::new(
            vec![Err(SubmitError::Rejected("limit exceeded".into()))],
            vec![],
        );
        let poller = OperationPoller::default();

        let err = poller
            .submit(
                &client,
                OperationKind::Create,
                &group(),
                &batch(),
                &mut SubmitState::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StabilizeError::Submit(SubmitError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        struct BrokenClient;

        #[async_trait]
        impl ControlPlane for BrokenClient {
            async fn submit(
                &self,
                _kind: OperationKind,
                _group: &TargetGroupId,
                _batch: &PlacementGroup,
            ) -> std::result::Result<OperationId, SubmitError> {
                unreachable!()
            }

            async fn operation_status(
                &self,
                _group: &TargetGroupId,
                _operation: &OperationId,
            ) -> std::result::Result<OperationStatus, ClientError> {
                Err(ClientError::Transport("connection reset".into()))
            }

            async fn describe_group(
                &self,
                _group: &TargetGroupId,
            ) -> std::result::Result<TargetGroupDescription, ClientError> {
                unreachable!()
            }
        }

        let poller = OperationPoller::default();
        let mut state = PollState::new(OperationHandle::new(OperationId::new("op-5"), group()));
        let err = poller.poll_once(&BrokenClient, &mut state).await.unwrap_err();
        assert!(matches!(err, StabilizeError::Client(_)));
    }

    #[test]
    fn test_poll_state_serde_round_trip() {
        let state = PollState::new(OperationHandle::new(OperationId::new("op-6"), group()));
        let json = serde_json::to_string(&state).unwrap();
        let back: PollState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
