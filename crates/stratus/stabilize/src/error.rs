//! Stabilization error types

use crate::client::SubmitError;
use crate::status::OperationStatus;
use std::time::Duration;
use stratus_types::{OperationId, TargetGroupId};
use thiserror::Error;

/// Errors returned by the control-plane client transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unknown target group: {0}")]
    UnknownGroup(TargetGroupId),
}

/// Stabilization errors
#[derive(Debug, Error)]
pub enum StabilizeError {
    #[error("operation {operation} reported unexpected status [{status}]")]
    UnexpectedStatus {
        operation: OperationId,
        status: OperationStatus,
    },

    #[error("operation {operation} did not stabilize within {timeout:?}")]
    Timeout {
        operation: OperationId,
        timeout: Duration,
    },

    #[error("submission to {group} stayed blocked by in-progress operations for {timeout:?}")]
    SubmitTimeout {
        group: TargetGroupId,
        timeout: Duration,
    },

    #[error("target group not found: {0}")]
    GroupNotFound(TargetGroupId),

    #[error("submission failed: {0}")]
    Submit(SubmitError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result type for stabilization operations
pub type Result<T> = std::result::Result<T, StabilizeError>;
