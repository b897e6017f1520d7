//! Operation status classification
//!
//! Maps the status a control plane reports for an operation onto the
//! poller's trichotomy: done, still pending, or fatal. The mapping is
//! exhaustive; a status the classifier does not recognize is fatal, never
//! pending, so an unexpected remote state can never poll forever.

use crate::error::{Result, StabilizeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use stratus_types::OperationId;
use tracing::{info, warn};

/// Status reported by the control plane for a long-running operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Succeeded,
    Running,
    Queued,
    Stopped,
    Failed,
    /// A status string this client does not know
    Other(String),
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::Succeeded => write!(f, "succeeded"),
            OperationStatus::Running => write!(f, "running"),
            OperationStatus::Queued => write!(f, "queued"),
            OperationStatus::Stopped => write!(f, "stopped"),
            OperationStatus::Failed => write!(f, "failed"),
            OperationStatus::Other(status) => write!(f, "{status}"),
        }
    }
}

/// Non-fatal classification outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// The operation reached its successful terminal state
    Done,

    /// The operation is still in flight; poll again later
    Pending,
}

/// Classify a reported status for the given operation.
pub fn classify(status: OperationStatus, operation: &OperationId) -> Result<StatusClass> {
    match status {
        OperationStatus::Succeeded => {
            info!(operation = %operation, "operation stabilized");
            Ok(StatusClass::Done)
        }
        OperationStatus::Running | OperationStatus::Queued => Ok(StatusClass::Pending),
        other => {
            warn!(operation = %operation, status = %other, "unexpected operation status");
            Err(StabilizeError::UnexpectedStatus {
                operation: operation.clone(),
                status: other,
            })
        }
    }
}
