//! Operation stabilization for the Stratus placement layer
//!
//! Drives long-running control-plane operations to a terminal state one
//! poll at a time. The poller is a re-entrant state machine: each
//! invocation performs exactly one status check and tells the caller
//! whether the operation completed, how long to suspend before the next
//! check, or why it fatally failed. Scheduling the suspension is the
//! caller's job; nothing here blocks a thread for the polling interval.

#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod backoff;
pub mod client;
pub mod context;
pub mod error;
pub mod poller;
pub mod status;

pub use backoff::BackoffSchedule;
pub use client::{
    describe_group, ControlPlane, GroupState, SubmitError, TargetGroupDescription,
};
pub use context::{CallbackContext, Phase};
pub use error::{ClientError, Result, StabilizeError};
pub use poller::{OperationPoller, PollOutcome, PollState, SubmitOutcome, SubmitState};
pub use status::{classify, OperationStatus, StatusClass};
